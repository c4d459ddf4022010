use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use html_escape::encode_text;

use super::super::format::format_timestamp;
use super::schema::ReportTable;

pub(crate) const ROWS_PER_PAGE: usize = 25;

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;font-size:10px;margin:0}\
.band{background:#2980b9;color:#fff;padding:12px 16px}\
.band h1{font-size:16px;margin:0}\
.band p{margin:4px 0 0}\
.page{padding:16px;page-break-after:always}\
.page:last-child{page-break-after:auto}\
table{width:100%;border-collapse:collapse;table-layout:fixed}\
th{background:#2980b9;color:#fff;text-align:left}\
th,td{border:1px solid #ddd;padding:4px;white-space:normal;overflow-wrap:anywhere}\
tbody tr:nth-child(even){background:#f5f5f5}\
@media print{thead{display:table-header-group}}";

/// Renders `table` as a self-contained HTML document split into pages of
/// [`ROWS_PER_PAGE`] rows, each page repeating the heading row.
pub(crate) fn render(table: &ReportTable, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();
    let title = escape_html(table.kind.title());

    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(
        html,
        "<html lang=\"pt-BR\"><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head><body>"
    );
    let _ = writeln!(
        html,
        "<header class=\"band\"><h1>Relatório de Recrutamento</h1><p>{title}</p><p>Gerado em: {}</p></header>",
        format_timestamp(generated_at)
    );

    let mut heading_row = String::from("<tr>");
    for heading in &table.headings {
        let _ = write!(heading_row, "<th>{}</th>", escape_html(heading));
    }
    heading_row.push_str("</tr>");

    // An empty table still yields one page carrying the heading row.
    let pages: Vec<_> = if table.rows.is_empty() {
        vec![&table.rows[..]]
    } else {
        table.rows.chunks(ROWS_PER_PAGE).collect()
    };

    for page in pages {
        let _ = write!(
            html,
            "<section class=\"page\"><table><thead>{heading_row}</thead><tbody>"
        );
        for row in page {
            html.push_str("<tr>");
            for cell in row {
                let _ = write!(html, "<td>{}</td>", escape_html(&cell.display()));
            }
            html.push_str("</tr>");
        }
        let _ = writeln!(html, "</tbody></table></section>");
    }

    html.push_str("</body></html>\n");
    html
}

/// Text-node escaping; line breaks inside a cell become `<br>`.
fn escape_html(raw: &str) -> String {
    encode_text(raw).replace('\n', "<br>")
}
