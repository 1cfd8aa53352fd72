// CSV export
//
// The two exports have different consumers and different conventions:
// - worksheet: `;` delimiter, quoting only where needed
// - wizard: `,` delimiter, every field quoted, quotes doubled

use std::path::Path;

use smeta_engine::{ProjectRecord, Record};

use crate::UTF8_BOM;

pub const PERCENT_LABEL: &str = "Процент (%)";
pub const PERCENT_AMOUNT_LABEL: &str = "Сумма по проценту";
pub const GRAND_TOTAL_LABEL: &str = "Итоговая сумма";

/// Worksheet export: header, one line per row, then three labeled trailer lines.
pub fn worksheet_csv<M>(record: &Record<M>) -> Result<Vec<u8>, String> {
    let mut lines: Vec<Vec<String>> = Vec::with_capacity(record.rows.len() + 4);
    lines.push(record.columns.clone());

    for row in &record.rows {
        let mut line = vec![
            row.index.to_string(),
            row.name.clone(),
            row.unit.clone(),
            smeta_core::plain(row.qty),
            smeta_core::plain(row.price),
            row.total.clone(),
        ];
        line.extend(row.extras.iter().cloned());
        lines.push(line);
    }

    lines.push(vec![PERCENT_LABEL.into(), record.percent.clone()]);
    lines.push(vec![PERCENT_AMOUNT_LABEL.into(), record.percent_amount.clone()]);
    lines.push(vec![GRAND_TOTAL_LABEL.into(), record.grand_total.clone()]);

    write_csv(&lines, b';', csv::QuoteStyle::Necessary)
}

/// Wizard export: `Раздел,Поле,Значение` triples covering the metadata
/// sections, the calculation and the production summary.
pub fn wizard_csv(record: &ProjectRecord) -> Result<Vec<u8>, String> {
    let meta = &record.metadata;
    let mut lines: Vec<Vec<String>> = vec![triple("Раздел", "Поле", "Значение")];

    push_section(&mut lines, "Информация", &meta.info.fields());
    push_section(&mut lines, "Бриф", &meta.brief.fields());
    push_section(&mut lines, "Дизайн", &meta.design.fields());

    lines.push(triple("—", "—", "—"));
    lines.push(triple("Расчет", "Колонки", &record.columns.join(",")));
    for row in &record.rows {
        let mut cells = vec![
            row.index.to_string(),
            row.name.clone(),
            row.unit.clone(),
            smeta_core::plain(row.qty),
            smeta_core::plain(row.price),
            record.strip_currency(&row.total),
        ];
        cells.extend(row.extras.iter().cloned());
        lines.push(triple("Расчет", "Позиция", &cells.join(",")));
    }
    lines.push(triple("Расчет", "Процент", &record.percent));
    lines.push(triple("Расчет", "Сумма по проценту", &record.percent_amount));
    lines.push(triple("Расчет", "Итог", &record.grand_total));

    lines.push(triple("—", "—", "—"));
    push_section(&mut lines, "Цех/Монтаж", &meta.production.fields());

    write_csv(&lines, b',', csv::QuoteStyle::Always)
}

pub fn export_worksheet<M>(record: &Record<M>, path: &Path) -> Result<(), String> {
    let bytes = worksheet_csv(record)?;
    std::fs::write(path, bytes).map_err(|e| e.to_string())
}

pub fn export_wizard(record: &ProjectRecord, path: &Path) -> Result<(), String> {
    let bytes = wizard_csv(record)?;
    std::fs::write(path, bytes).map_err(|e| e.to_string())
}

fn triple(section: &str, field: &str, value: &str) -> Vec<String> {
    vec![section.to_string(), field.to_string(), value.to_string()]
}

fn push_section(lines: &mut Vec<Vec<String>>, section: &str, fields: &[(&'static str, &str)]) {
    for (key, value) in fields {
        lines.push(triple(section, key, value));
    }
}

fn write_csv(lines: &[Vec<String>], delimiter: u8, quoting: csv::QuoteStyle) -> Result<Vec<u8>, String> {
    // Trailer lines are shorter than the header
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quoting)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(UTF8_BOM.as_bytes().to_vec());

    for line in lines {
        writer.write_record(line).map_err(|e| e.to_string())?;
    }

    writer.into_inner().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smeta_core::NumberStyle;
    use smeta_engine::{Field, RowInit, Wizard, Worksheet};
    use std::fs;
    use tempfile::tempdir;

    fn scenario_sheet() -> Worksheet {
        let mut sheet = Worksheet::new(NumberStyle::default());
        let table = sheet.table_mut();
        table.add_row(RowInit::new("PVC 5–10 мм", "м²").quantity(2.0).unit_price(100.0));
        table.add_row(RowInit::new("Крепёж; рама", "комплект").quantity(1.0).unit_price(250.0));
        table.set_percent("10");
        sheet
    }

    fn decode(bytes: &[u8]) -> String {
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        text.strip_prefix(UTF8_BOM).expect("missing BOM").to_string()
    }

    #[test]
    fn test_worksheet_csv_layout() {
        let text = decode(&worksheet_csv(&scenario_sheet().record()).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "#;Статья;Ед;Кол-во;Цена за ед.;Итого");
        assert_eq!(lines[1], "1;PVC 5–10 мм;м²;2;100;200.00 ₸");
        // Embedded delimiter gets quoted
        assert_eq!(lines[2], "2;\"Крепёж; рама\";комплект;1;250;250.00 ₸");
        assert_eq!(lines[3], "Процент (%);10");
        assert_eq!(lines[4], "Сумма по проценту;45.00 ₸");
        assert_eq!(lines[5], "Итоговая сумма;495.00 ₸");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_worksheet_csv_includes_user_columns() {
        let mut sheet = scenario_sheet();
        let id = sheet.table().rows()[0].id();
        sheet.table_mut().add_column("Цвет");
        sheet.table_mut().set_field(id, Field::Extra(0), "белый");

        let text = decode(&worksheet_csv(&sheet.record()).unwrap());
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(records[0].get(6), Some("Цвет"));
        assert_eq!(records[1].get(6), Some("белый"));
        assert_eq!(records[2].get(6), Some(""));
        assert_eq!(records[3].len(), 2);
    }

    #[test]
    fn test_wizard_csv_quotes_everything() {
        let mut wizard = Wizard::new(NumberStyle::default());
        wizard.metadata_mut().info.company = "ТОО \"Ромашка\"".into();
        wizard.table_mut().add_row(RowInit::new("Баннер", "м²").quantity(2.0).unit_price(100.0));
        wizard.table_mut().set_percent("10");

        let text = decode(&wizard_csv(&wizard.record()).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "\"Раздел\",\"Поле\",\"Значение\"");
        assert_eq!(lines[1], "\"Информация\",\"company\",\"ТОО \"\"Ромашка\"\"\"");
        assert!(lines.contains(&"\"—\",\"—\",\"—\""));
        assert!(lines.contains(&"\"Расчет\",\"Колонки\",\"#,Статья,Ед,Кол-во,Цена за ед.,Итого\""));
        assert!(lines.contains(&"\"Расчет\",\"Позиция\",\"1,Баннер,м²,2,100,200.00\""));
        assert!(lines.contains(&"\"Расчет\",\"Процент\",\"10\""));
        assert!(lines.contains(&"\"Расчет\",\"Сумма по проценту\",\"20.00 ₸\""));
        assert!(lines.contains(&"\"Расчет\",\"Итог\",\"220.00 ₸\""));
        assert_eq!(lines.last().copied(), Some("\"Цех/Монтаж\",\"montage\",\"\""));
    }

    #[test]
    fn test_wizard_csv_section_sizes() {
        let wizard = Wizard::new(NumberStyle::default());
        let text = decode(&wizard_csv(&wizard.record()).unwrap());
        // header + 6 info + 6 brief + 6 design + sep + columns + 3 trailer + sep + 4 production
        assert_eq!(text.lines().count(), 1 + 6 + 6 + 6 + 1 + 1 + 3 + 1 + 4);
    }

    #[test]
    fn test_export_writes_bom_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("smeta.csv");
        export_worksheet(&scenario_sheet().record(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert!(decode(&bytes).starts_with("#;"));

        let path = dir.path().join("wizard.csv");
        export_wizard(&Wizard::new(NumberStyle::default()).record(), &path).unwrap();
        assert!(fs::read(&path).unwrap().starts_with(UTF8_BOM.as_bytes()));
    }
}
