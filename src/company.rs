//! Company, address, and date value types
//!
//! These are plain values decoded from the registry's JSON records. Every
//! field defaults, so a record whose nested containers are missing decodes to
//! a zero-value entity instead of failing the whole page.

use chrono::NaiveDate;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Wire format for calendar dates
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date without time-of-day
///
/// The registry encodes dates as `"YYYY-MM-DD"` strings or JSON `null`;
/// `null` and an absent field both decode to the zero date with no error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(Option<NaiveDate>);

impl Date {
    /// Wrap a concrete calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// The underlying date, if one was set
    pub fn as_naive(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Check whether this is the zero date
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(Some(date))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self(None)),
            Some(raw) if raw.is_empty() => Ok(Self(None)),
            Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map(|date| Self(Some(date)))
                .map_err(de::Error::custom),
        }
    }
}

/// A company's registered postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Address {
    /// Street line
    #[serde(rename = "street_address")]
    pub street: String,
    /// City or locality
    #[serde(rename = "locality")]
    pub city: String,
    /// Region, county, or state
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    /// Postal code
    pub postal_code: String,
    /// Country name
    pub country: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {} {}",
            self.street, self.city, self.region, self.postal_code, self.country
        )
    }
}

/// A company record as returned by the registry
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Company {
    /// Registered name
    pub name: String,
    /// Legal form, e.g. "SARL" or "Private Limited Company"
    #[serde(rename = "company_type")]
    pub kind: String,
    /// Registry identifier within the jurisdiction
    #[serde(rename = "company_number")]
    pub number: String,
    /// ISO country code
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country_code: String,
    /// Jurisdiction code, e.g. "fr" or "gb"
    #[serde(rename = "jurisdiction_code", skip_serializing_if = "String::is_empty")]
    pub jurisdiction: String,
    /// Date of incorporation, if recorded
    #[serde(rename = "incorporation_date")]
    pub creation_date: Date,
    /// Date of dissolution, if any
    pub dissolution_date: Date,
    /// Registered address
    #[serde(rename = "registered_address")]
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_date_round_trip() {
        let date: Date = serde_json::from_value(json!("2013-04-19")).unwrap();
        assert_eq!(date.to_string(), "2013-04-19");
        assert_eq!(serde_json::to_value(date).unwrap(), json!("2013-04-19"));

        let back: Date = serde_json::from_value(serde_json::to_value(date).unwrap()).unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn test_date_null_is_zero() {
        let date: Date = serde_json::from_value(json!(null)).unwrap();
        assert!(date.is_zero());
        assert_eq!(date, Date::default());
        assert_eq!(date.to_string(), "");
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert!(serde_json::from_value::<Date>(json!("19/04/2013")).is_err());
    }

    #[test]
    fn test_company_decodes_full_record() {
        let company: Company = serde_json::from_value(json!({
            "name": "SARL NAUTIC MOTOR'S EVASION",
            "company_type": "SARL, société à responsabilité limitée",
            "company_number": "529591737",
            "jurisdiction_code": "fr",
            "incorporation_date": "2010-12-07",
            "dissolution_date": null,
            "registered_address": {
                "street_address": "1 QUAI DU GRAND BÉ",
                "locality": "SAINT-MALO",
                "postal_code": "35400",
                "country": "France"
            }
        }))
        .unwrap();

        assert_eq!(company.name, "SARL NAUTIC MOTOR'S EVASION");
        assert_eq!(company.number, "529591737");
        assert_eq!(company.jurisdiction, "fr");
        assert_eq!(company.creation_date.to_string(), "2010-12-07");
        assert!(company.dissolution_date.is_zero());
        assert_eq!(company.address.city, "SAINT-MALO");
        assert_eq!(company.address.region, "");
    }

    #[test]
    fn test_company_missing_containers_decode_to_zero_values() {
        let company: Company = serde_json::from_value(json!({
            "name": "BARE LTD"
        }))
        .unwrap();

        assert_eq!(company.name, "BARE LTD");
        assert_eq!(company.address, Address::default());
        assert!(company.creation_date.is_zero());

        let empty: Company = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, Company::default());
    }

    #[test]
    fn test_address_display() {
        let address = Address {
            street: "1 QUAI DU GRAND BÉ".into(),
            city: "SAINT-MALO".into(),
            region: "Bretagne".into(),
            postal_code: "35400".into(),
            country: "France".into(),
        };
        assert_eq!(
            address.to_string(),
            "1 QUAI DU GRAND BÉ, SAINT-MALO, Bretagne, 35400 France"
        );
    }
}
