// Console table rendering for report output. Values are truncated for
// display here only; the underlying declarations stay intact.

use locdiff_core::{Declaration, TranslatedDeclaration};
use locdiff_services::display_value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DeclarationRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct TranslationRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Translation")]
    translation: String,
}

pub fn declarations_table<'a, I>(decls: I) -> String
where
    I: IntoIterator<Item = &'a Declaration>,
{
    let rows: Vec<DeclarationRow> = decls
        .into_iter()
        .map(|d| DeclarationRow {
            line: d.line,
            key: d.key.clone(),
            value: display_value(&d.value),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

pub fn translations_table(decls: &[TranslatedDeclaration]) -> String {
    let rows: Vec<TranslationRow> = decls
        .iter()
        .map(|d| TranslationRow {
            line: d.line,
            key: d.key.clone(),
            value: display_value(&d.value),
            translation: display_value(&d.translation),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}
