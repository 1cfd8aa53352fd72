// Rich-table export (HTML fragments for word processors)
//
// Output is a single line of markup. The collaborator that owns the
// clipboard wraps it as a `text/html` flavor.

use std::fmt::Write as _;

use smeta_engine::{ProjectRecord, Record};

/// Title shown above the wizard document.
pub const WIZARD_TITLE: &str = "Grace — Заказ";

const SIMPLE_TABLE_OPEN: &str = "<table border='1' cellspacing='0' cellpadding='5'>";
const WIZARD_TABLE_OPEN: &str = "<table border='1' cellspacing='0' cellpadding='6'>";

/// The worksheet as one table: header, rows, then percent and totals.
pub fn rich_table<M>(record: &Record<M>) -> String {
    let mut html = String::from(SIMPLE_TABLE_OPEN);
    push_header(&mut html, &record.columns);

    for row in &record.rows {
        html.push_str("<tr>");
        push_cell(&mut html, &row.index.to_string());
        push_cell(&mut html, &row.name);
        push_cell(&mut html, &row.unit);
        push_cell(&mut html, &smeta_core::plain(row.qty));
        push_cell(&mut html, &smeta_core::plain(row.price));
        push_cell(&mut html, &row.total);
        for extra in &row.extras {
            push_cell(&mut html, extra);
        }
        html.push_str("</tr>");
    }

    push_trailer(&mut html, "Процент (%)", &format!("{}%", record.percent), false);
    push_trailer(&mut html, "Сумма по проценту", &record.percent_amount, false);
    push_trailer(&mut html, "Итоговая сумма", &record.grand_total, true);
    html.push_str("</table>");
    html
}

/// The wizard as a titled document: metadata table, calculation table and
/// production summary, separated by line breaks.
pub fn wizard_document(record: &ProjectRecord) -> String {
    let meta = &record.metadata;
    let mut html = format!("<h3>{}</h3>", escape_html(WIZARD_TITLE));

    html.push_str(WIZARD_TABLE_OPEN);
    push_section(&mut html, "Информация");
    push_pair(&mut html, "Компания/Заказ", &meta.info.company);
    push_pair(&mut html, "Дата старта", &meta.info.start);
    push_pair(&mut html, "Дата сдачи", &meta.info.due);
    push_pair(&mut html, "Клиент (ФИО)", &meta.info.client);
    push_pair(&mut html, "Телефон", &meta.info.phone);
    push_pair(&mut html, "Менеджер", &meta.info.manager);
    push_section(&mut html, "ТЗ / Бриф");
    push_pair(&mut html, "Назначение", &meta.brief.purpose);
    push_pair(&mut html, "Материал", &meta.brief.materials);
    push_pair(&mut html, "Цвета", &meta.brief.colors);
    push_pair(&mut html, "Размеры", &meta.brief.sizes);
    push_pair(&mut html, "Техника/Доступ", &meta.brief.tech);
    push_pair(&mut html, "Сроки", &meta.brief.terms);
    push_section(&mut html, "Дизайн");
    push_pair(&mut html, "Версия 1", &meta.design.v1);
    push_pair(&mut html, "Версия 2", &meta.design.v2);
    push_pair(&mut html, "Замечания", &meta.design.notes);
    push_pair(&mut html, "Финальный макет", &meta.design.final_layout);
    push_pair(&mut html, "Дизайнер", &meta.design.designer);
    push_pair(&mut html, "Дата утверждения", &meta.design.approve_date);
    html.push_str("</table><br>");

    html.push_str(WIZARD_TABLE_OPEN);
    push_header(&mut html, &record.columns);
    for row in &record.rows {
        html.push_str("<tr>");
        push_cell(&mut html, &row.index.to_string());
        push_cell(&mut html, &row.name);
        push_cell(&mut html, &row.unit);
        push_cell(&mut html, &smeta_core::plain(row.qty));
        push_cell(&mut html, &smeta_core::plain(row.price));
        push_cell(&mut html, &record.strip_currency(&row.total));
        for extra in &row.extras {
            push_cell(&mut html, extra);
        }
        html.push_str("</tr>");
    }
    push_trailer(&mut html, "Процент", &format!("{} %", record.percent), false);
    push_trailer(&mut html, "Сумма по проценту", &record.percent_amount, false);
    push_trailer(&mut html, "Итоговая сумма", &record.grand_total, true);
    html.push_str("</table><br>");

    html.push_str(WIZARD_TABLE_OPEN);
    push_section(&mut html, "Цех / Монтаж — сводка");
    push_pair(&mut html, "Материалы", &meta.production.materials);
    push_pair(&mut html, "Техкарта", &meta.production.tech);
    push_pair(&mut html, "Сроки по этапам", &meta.production.terms);
    push_pair(&mut html, "Адрес/условия монтажа", &meta.production.montage);
    html.push_str("</table>");
    html
}

/// Escape text for use inside element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return s.to_string();
    }
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn push_header(html: &mut String, columns: &[String]) {
    html.push_str("<tr>");
    for column in columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr>");
}

fn push_cell(html: &mut String, text: &str) {
    let _ = write!(html, "<td>{}</td>", escape_html(text));
}

fn push_section(html: &mut String, title: &str) {
    let _ = write!(html, "<tr><th colspan='2'>{}</th></tr>", escape_html(title));
}

fn push_pair(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        "<tr><td>{}</td><td>{}</td></tr>",
        escape_html(label),
        escape_html(value)
    );
}

// The label spans the five leading columns, the value sits under "Итого"
fn push_trailer(html: &mut String, label: &str, value: &str, bold: bool) {
    if bold {
        let _ = write!(
            html,
            "<tr><td colspan='5'><b>{}</b></td><td><b>{}</b></td></tr>",
            escape_html(label),
            escape_html(value)
        );
    } else {
        let _ = write!(
            html,
            "<tr><td colspan='5'>{}</td><td>{}</td></tr>",
            escape_html(label),
            escape_html(value)
        );
    }
}
