//! Form field parsing
//!
//! Forms carry raw text as typed. These helpers turn it into typed values
//! or a localized `Validation` error. Edit forms append " saat mengedit"
//! to their messages.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::display::format::parse_input_date;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{ChoiceParseError, Money};

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Create => "",
            Self::Edit => " saat mengedit",
        }
    }

    /// `"{message}{suffix}."`
    pub(crate) fn message(&self, message: &str) -> PlannerError {
        PlannerError::Validation(format!("{}{}.", message, self.suffix()))
    }
}

/// Fail with `message` unless every field has non-blank text
pub(crate) fn require(mode: FormMode, fields: &[&str], message: &str) -> PlannerResult<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(mode.message(message));
    }
    Ok(())
}

/// Parse a non-negative amount
pub(crate) fn parse_amount(mode: FormMode, value: &str) -> PlannerResult<Money> {
    let amount = Money::parse(value).map_err(|_| mode.message("Jumlah harus berupa angka"))?;
    if amount.is_negative() {
        return Err(mode.message("Jumlah tidak boleh negatif"));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(mode: FormMode, value: &str) -> PlannerResult<NaiveDate> {
    parse_input_date(value).ok_or_else(|| mode.message("Tanggal harus berformat YYYY-MM-DD"))
}

/// Parse one of the fixed labels
pub(crate) fn parse_choice<T>(value: &str) -> PlannerResult<T>
where
    T: FromStr<Err = ChoiceParseError>,
{
    T::from_str(value.trim()).map_err(|e| PlannerError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_require_reports_edit_variant() {
        let err = require(FormMode::Edit, &["Sewa", " "], "Nama item, jumlah, dan kategori harus diisi")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Nama item, jumlah, dan kategori harus diisi saat mengedit."
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(
            parse_amount(FormMode::Create, "3000000").unwrap(),
            Money::from_rupiah(3_000_000)
        );
        assert!(matches!(
            parse_amount(FormMode::Create, "tiga juta"),
            Err(PlannerError::Validation(msg)) if msg == "Jumlah harus berupa angka."
        ));
        assert!(matches!(
            parse_amount(FormMode::Edit, "-1"),
            Err(PlannerError::Validation(msg)) if msg == "Jumlah tidak boleh negatif saat mengedit."
        ));
    }

    #[test]
    fn test_parse_choice_names_field() {
        let err = parse_choice::<Category>("Bulan Madu").unwrap_err();
        assert!(err.to_string().contains("kategori"));
        assert_eq!(parse_choice::<Category>(" Katering ").unwrap(), Category::Catering);
    }
}
