// Infrastructure layer - configuration, backend access and SVG output
pub mod chart_svg;
pub mod config;
pub mod influx_gateway;
pub mod message_svg;
