use crate::model::metrics::MetricSummary;
use crate::report::{escape_html, format_f64_4};

const CSS: &str = r#"
body { background-color: #ffffff; font-family: sans-serif; }
h1, h2 { text-align: center; }
div { white-space: normal; text-align: center; }
table { border-collapse: collapse; margin: auto; }
th, td { padding: 5px; }
thead th { border-top: 2px solid; border-bottom: 1px solid; }
tbody tr:last-child td { border-bottom: 2px solid; }
"#;

pub struct ReportRow<'a> {
    pub model_type: &'a str,
    pub summary: &'a MetricSummary,
}

pub fn table_columns(summary: &MetricSummary) -> Vec<(String, f64)> {
    let mut cols = summary
        .operating_points
        .iter()
        .map(|p| (p.label(), p.tpr))
        .collect::<Vec<_>>();
    cols.push(("AUC-ROC".to_string(), summary.auc));
    cols.push(("MIA".to_string(), summary.mia));
    cols.push(("Accuracy".to_string(), summary.balanced_accuracy));
    cols
}

pub fn render_metric_table(rows: &[ReportRow<'_>]) -> String {
    let mut out = String::new();
    out.push_str("<table>\n<thead>\n<tr><th>Model type</th>");
    if let Some(first) = rows.first() {
        for (label, _) in table_columns(first.summary) {
            out.push_str(&format!("<th>{}</th>", escape_html(&label)));
        }
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        out.push_str(&format!("<tr><td>{}</td>", escape_html(row.model_type)));
        for (_, value) in table_columns(row.summary) {
            out.push_str(&format!("<td>{}</td>", format_f64_4(value)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Self-contained page: metric table plus the inline ROC figure.
pub fn render_detailed_html(title: &str, rows: &[ReportRow<'_>], roc_svg: &str) -> String {
    let title = escape_html(title);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{} - Detailed scores</title>\n", title));
    out.push_str(&format!("<style>{}</style>\n", CSS));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{} - Detailed Results</h1>\n\n", title));
    out.push_str("<h2>Metric Scores</h2>\n<div>\n");
    out.push_str(&render_metric_table(rows));
    out.push_str("</div>\n\n<h2>ROC Curve</h2>\n<div>\n");
    out.push_str(roc_svg);
    out.push_str("</div>\n</body>\n</html>\n");
    out
}
