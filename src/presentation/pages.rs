// HTML pages, format!-built around a shared shell
use crate::domain::status::StatusReport;

const STYLE: &str = "\
body{background:#272727;color:#eee;font-family:sans-serif;margin:2em auto;max-width:72em;padding:0 1em}\
a{color:#729fcf}\
h1,h2{font-weight:normal}\
nav a{margin-right:1em}\
table{border-collapse:collapse;margin:0.5em 0}\
td{padding:0.2em 0.8em;border:1px solid #444}\
.ok{color:#4e9a06}\
.warning{color:#f57900}\
.error{color:#cc0000}\
.node{margin-bottom:2em}\
img{max-width:100%}\
footer{margin-top:3em;color:#888;font-size:0.8em}";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style type=\"text/css\" rel=\"stylesheet\">{STYLE}</style>\n\
         </head>\n<body>\n<nav><a href=\"/\">contact</a><a href=\"/status\">status</a></nav>\n\
         {body}\n</body>\n</html>\n"
    )
}

pub fn index_html(contact: &str) -> String {
    let contact = escape(contact);
    page(
        "contact",
        &format!(
            "<h1>Contact</h1>\n\
             <p>Questions, problems with one of the services, or just want to say hi?</p>\n\
             <p>Mail: <a href=\"mailto:{contact}\">{contact}</a></p>"
        ),
    )
}

pub fn status_html(report: &StatusReport) -> String {
    let mut body = String::from("<h1>Status</h1>\n");
    body.push_str(&format!(
        "<p class=\"overall {0}\">Overall: {0}</p>\n",
        report.overall.css_class()
    ));
    body.push_str(
        "<img class=\"status-svg\" src=\"/status-800x450.svg\" alt=\"Heart rate, last 12 hours\">\n",
    );

    for node in &report.nodes {
        let name = escape(&node.name);
        body.push_str(&format!("<section class=\"node\">\n<h2>{name}</h2>\n"));

        body.push_str("<table class=\"loads\"><tr>");
        for load in &node.loads {
            body.push_str(&format!(
                "<td class=\"{}\">{:.2}</td>",
                load.severity.css_class(),
                load.value
            ));
        }
        body.push_str("</tr></table>\n");

        body.push_str("<table class=\"services\">\n");
        for service in &node.services {
            body.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td></tr>\n",
                service.severity.css_class(),
                escape(&service.name),
                escape(&service.message)
            ));
        }
        body.push_str("</table>\n");

        body.push_str(&format!(
            "<img class=\"load-svg\" src=\"/load-{name}-600x200.svg\" alt=\"{name} load, last hour\">\n"
        ));
        body.push_str("</section>\n");
    }

    body.push_str(&format!(
        "<footer>Generated at {}</footer>",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    page("status", &body)
}

pub fn not_found_html() -> String {
    page("404", "<h1>404</h1>\n<p>Sorry, this page was not found.</p>")
}
