//! Validation and normalisation of new item submissions.
//!
//! Rules run in a fixed order and the first failure wins, so callers get a
//! single field-specific message.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::item::or_default;
use super::{
    CreatedBy, DEFAULT_CATEGORY, DEFAULT_CURRENCY, DEFAULT_STATUS, Error, Item, ItemId, MAX_STOCK,
    MAX_TAGS,
};

const NAME_MIN_LEN: usize = 2;
const DESCRIPTION_MIN_LEN: usize = 10;

/// A number supplied either as a JSON number or as text from a form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON number.
    Number(f64),
    /// Raw text, parsed after trimming.
    Text(String),
    /// A boolean, array, object or out-of-range literal supplied where a
    /// number was expected. Never numeric.
    #[serde(skip_deserializing)]
    Unreadable,
}

impl NumericInput {
    /// Interpret the input as a finite number. Blank text yields `None`.
    pub(crate) fn to_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            Self::Unreadable => return None,
        };
        value.is_finite().then_some(value)
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Raw fields of an "add item" request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSubmission {
    /// Item name.
    #[serde(default)]
    pub name: String,
    /// Item description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    #[serde(default)]
    pub price: Option<NumericInput>,
    /// Units in stock; blank means zero.
    #[serde(default)]
    pub stock: Option<NumericInput>,
    /// ISO currency code; defaults to USD.
    #[serde(default)]
    pub currency: Option<String>,
    /// Free-text category.
    #[serde(default)]
    pub category: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub tags: Option<String>,
}

/// The first rule a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionIssue {
    /// Name shorter than two characters once trimmed.
    NameTooShort,
    /// Description shorter than ten characters once trimmed.
    DescriptionTooShort,
    /// Price missing, non-numeric, non-finite or negative.
    InvalidPrice,
    /// Stock non-numeric, fractional, negative or above [`MAX_STOCK`].
    InvalidStock,
}

impl SubmissionIssue {
    /// Request field the rule applies to.
    pub fn field(self) -> &'static str {
        match self {
            Self::NameTooShort => "name",
            Self::DescriptionTooShort => "description",
            Self::InvalidPrice => "price",
            Self::InvalidStock => "stock",
        }
    }

    /// User-facing explanation.
    pub fn message(self) -> &'static str {
        match self {
            Self::NameTooShort => "Name must be at least 2 characters.",
            Self::DescriptionTooShort => "Description must be at least 10 characters.",
            Self::InvalidPrice => "Price must be a valid number of 0 or more.",
            Self::InvalidStock => "Stock must be a whole number of 0 or more.",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::NameTooShort | Self::DescriptionTooShort => "too_short",
            Self::InvalidPrice | Self::InvalidStock => "invalid_number",
        }
    }
}

impl From<SubmissionIssue> for Error {
    fn from(issue: SubmissionIssue) -> Self {
        Error::invalid_request(issue.message()).with_details(json!({
            "field": issue.field(),
            "code": issue.code(),
        }))
    }
}

/// A submission that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    /// Trimmed name.
    pub name: String,
    /// Trimmed description.
    pub description: String,
    /// Finite, non-negative price.
    pub price: f64,
    /// Upper-cased currency code.
    pub currency: String,
    /// Units in stock.
    pub stock: u32,
    /// Category, defaulted when blank.
    pub category: String,
    /// Parsed tags, at most [`MAX_TAGS`].
    pub tags: Vec<String>,
}

impl ItemSubmission {
    /// Validate and normalise the submission.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{ItemSubmission, SubmissionIssue};
    ///
    /// let submission = ItemSubmission {
    ///     name: "Mug".into(),
    ///     description: "Stoneware coffee mug".into(),
    ///     price: Some((-1.0).into()),
    ///     ..ItemSubmission::default()
    /// };
    /// assert_eq!(submission.validate(), Err(SubmissionIssue::InvalidPrice));
    /// ```
    pub fn validate(self) -> Result<ItemDraft, SubmissionIssue> {
        let name = self.name.trim();
        if name.chars().count() < NAME_MIN_LEN {
            return Err(SubmissionIssue::NameTooShort);
        }

        let description = self.description.trim();
        if description.chars().count() < DESCRIPTION_MIN_LEN {
            return Err(SubmissionIssue::DescriptionTooShort);
        }

        let price = self
            .price
            .as_ref()
            .and_then(NumericInput::to_finite)
            .filter(|value| *value >= 0.0)
            .ok_or(SubmissionIssue::InvalidPrice)?;

        let stock = parse_stock(self.stock.as_ref())?;

        Ok(ItemDraft {
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            currency: or_default(self.currency, DEFAULT_CURRENCY).to_uppercase(),
            stock,
            category: or_default(self.category, DEFAULT_CATEGORY),
            tags: parse_tags(self.tags.as_deref().unwrap_or_default()),
        })
    }
}

fn parse_stock(input: Option<&NumericInput>) -> Result<u32, SubmissionIssue> {
    let Some(input) = input.filter(|value| !value.is_blank()) else {
        return Ok(0);
    };
    let value = input.to_finite().ok_or(SubmissionIssue::InvalidStock)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(MAX_STOCK) {
        return Err(SubmissionIssue::InvalidStock);
    }
    // Range and integrality were checked above.
    Ok(value as u32)
}

/// Split a comma-separated tag list, dropping blanks and capping the count.
///
/// # Examples
/// ```
/// use catalog::domain::parse_tags;
///
/// assert_eq!(parse_tags(" red, ,blue ,"), vec!["red", "blue"]);
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .take(MAX_TAGS)
        .map(str::to_owned)
        .collect()
}

impl ItemDraft {
    /// Stamp the draft with identity, creator and timestamps.
    pub fn into_item(self, id: ItemId, created_by: CreatedBy, now: DateTime<Utc>) -> Item {
        Item {
            id,
            custom_id: None,
            name: self.name,
            description: self.description,
            price: self.price,
            currency: self.currency,
            stock: self.stock,
            category: self.category,
            tags: self.tags,
            status: DEFAULT_STATUS.to_owned(),
            rating: None,
            created_at: Some(now),
            updated_at: Some(now),
            created_by: Some(created_by),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid() -> ItemSubmission {
        ItemSubmission {
            name: "Ceramic Vase".to_owned(),
            description: "Hand-thrown vase with a celadon glaze".to_owned(),
            price: Some("24.50".into()),
            stock: Some("3".into()),
            currency: None,
            category: Some("Home".to_owned()),
            tags: Some("ceramic, handmade".to_owned()),
        }
    }

    #[rstest]
    fn valid_submission_normalises(valid: ItemSubmission) {
        let draft = valid.validate().expect("valid submission");
        assert_eq!(draft.name, "Ceramic Vase");
        assert_eq!(draft.price, 24.5);
        assert_eq!(draft.stock, 3);
        assert_eq!(draft.currency, DEFAULT_CURRENCY);
        assert_eq!(draft.tags, vec!["ceramic", "handmade"]);
    }

    #[rstest]
    #[case(Some(NumericInput::Number(-0.01)))]
    #[case(Some(NumericInput::Text("-3".to_owned())))]
    #[case(Some(NumericInput::Text("ten".to_owned())))]
    #[case(Some(NumericInput::Text("NaN".to_owned())))]
    #[case(Some(NumericInput::Text("inf".to_owned())))]
    #[case(Some(NumericInput::Text("  ".to_owned())))]
    #[case(Some(NumericInput::Unreadable))]
    #[case(None)]
    fn rejects_bad_prices(mut valid: ItemSubmission, #[case] price: Option<NumericInput>) {
        valid.price = price;
        assert_eq!(valid.validate(), Err(SubmissionIssue::InvalidPrice));
    }

    #[rstest]
    #[case(Some(NumericInput::Number(0.0)), 0.0)]
    #[case(Some(NumericInput::Text(" 0 ".to_owned())), 0.0)]
    #[case(Some(NumericInput::Number(19.99)), 19.99)]
    fn accepts_non_negative_prices(
        mut valid: ItemSubmission,
        #[case] price: Option<NumericInput>,
        #[case] expected: f64,
    ) {
        valid.price = price;
        assert_eq!(valid.validate().expect("valid price").price, expected);
    }

    #[rstest]
    #[case(None, Ok(0))]
    #[case(Some(NumericInput::Text(String::new())), Ok(0))]
    #[case(Some(NumericInput::Number(7.0)), Ok(7))]
    #[case(Some(NumericInput::Text("2.5".to_owned())), Err(SubmissionIssue::InvalidStock))]
    #[case(Some(NumericInput::Number(-1.0)), Err(SubmissionIssue::InvalidStock))]
    #[case(Some(NumericInput::Text("lots".to_owned())), Err(SubmissionIssue::InvalidStock))]
    #[case(Some(NumericInput::Unreadable), Err(SubmissionIssue::InvalidStock))]
    #[case(Some(NumericInput::Number(2_147_483_647.0)), Ok(MAX_STOCK))]
    #[case(Some(NumericInput::Number(2_147_483_648.0)), Err(SubmissionIssue::InvalidStock))]
    #[case(Some(NumericInput::Text("3000000000".to_owned())), Err(SubmissionIssue::InvalidStock))]
    fn stock_rules(
        mut valid: ItemSubmission,
        #[case] stock: Option<NumericInput>,
        #[case] expected: Result<u32, SubmissionIssue>,
    ) {
        valid.stock = stock;
        assert_eq!(valid.validate().map(|draft| draft.stock), expected);
    }

    #[rstest]
    fn first_failing_rule_wins(mut valid: ItemSubmission) {
        valid.name = " a ".to_owned();
        valid.description = "short".to_owned();
        valid.price = Some(NumericInput::Number(-1.0));
        assert_eq!(valid.validate(), Err(SubmissionIssue::NameTooShort));
    }

    #[rstest]
    fn short_description_is_rejected(mut valid: ItemSubmission) {
        valid.description = "  too short  ".to_owned();
        let issue = valid.validate().expect_err("description too short");
        assert_eq!(issue, SubmissionIssue::DescriptionTooShort);
        let error = Error::from(issue);
        assert_eq!(error.details().map(|d| d["field"].clone()), Some("description".into()));
    }

    #[rstest]
    fn blank_category_defaults(mut valid: ItemSubmission) {
        valid.category = Some("   ".to_owned());
        assert_eq!(valid.validate().expect("valid").category, DEFAULT_CATEGORY);
    }

    #[rstest]
    fn tags_are_capped() {
        let raw = (0..15).map(|n| format!("t{n}")).collect::<Vec<_>>().join(",");
        let tags = parse_tags(&raw);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags.first().map(String::as_str), Some("t0"));
    }

    #[rstest]
    fn duplicate_tags_are_kept() {
        assert_eq!(parse_tags("a,a"), vec!["a", "a"]);
    }

    #[rstest]
    fn numeric_input_deserialises_from_number_or_text() {
        let number: NumericInput = serde_json::from_str("12.5").expect("number");
        let text: NumericInput = serde_json::from_str("\"12.5\"").expect("text");
        assert_eq!(number.to_finite(), text.to_finite());
    }
}
