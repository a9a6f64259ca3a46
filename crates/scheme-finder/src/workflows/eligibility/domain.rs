use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for catalog schemes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemeId(pub String);

/// Identifier wrapper for the account owning a stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Social category used by reservation-based schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Obc,
    Sc,
    St,
    Ews,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Obc => "obc",
            Self::Sc => "sc",
            Self::St => "st",
            Self::Ews => "ews",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Obc => "OBC",
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Ews => "EWS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Student,
    Employed,
    SelfEmployed,
    Unemployed,
    Farmer,
    Retired,
    Homemaker,
}

impl Occupation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Employed => "employed",
            Self::SelfEmployed => "self_employed",
            Self::Unemployed => "unemployed",
            Self::Farmer => "farmer",
            Self::Retired => "retired",
            Self::Homemaker => "homemaker",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfEmployed => "self employed",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    None,
    Primary,
    Secondary,
    HigherSecondary,
    Graduate,
    Postgraduate,
    Doctorate,
}

impl Education {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::HigherSecondary => "higher_secondary",
            Self::Graduate => "graduate",
            Self::Postgraduate => "postgraduate",
            Self::Doctorate => "doctorate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherSecondary => "higher secondary",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disability {
    #[default]
    None,
    Visual,
    Hearing,
    Locomotor,
    Mental,
    Multiple,
}

impl Disability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Visual => "visual",
            Self::Hearing => "hearing",
            Self::Locomotor => "locomotor",
            Self::Mental => "mental",
            Self::Multiple => "multiple",
        }
    }

    pub const fn is_declared(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Citizen attributes supplied by the profile store.
///
/// Every attribute is optional so partially completed profiles can still be
/// matched; `category` and `disability` fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default)]
    pub occupation: Option<Occupation>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disability: Disability,
    #[serde(default)]
    pub annual_income: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_bpl: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_minority: bool,
}

impl Profile {
    /// Age, gender and occupation drive most schemes; without them matches are
    /// mostly gaps. An age of 0 is an unfilled form field, not a newborn.
    pub fn is_incomplete(&self) -> bool {
        matches!(self.age, None | Some(0)) || self.gender.is_none() || self.occupation.is_none()
    }
}

/// Catalog record describing a scheme and its eligibility constraints.
///
/// A constraint that is `None` or an empty list is inactive and does not take
/// part in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    pub ministry: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub documents_required: Option<Vec<String>>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub min_age: Option<u32>,
    #[serde(default)]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Vec<Gender>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub occupations: Option<Vec<Occupation>>,
    #[serde(default)]
    pub education_levels: Option<Vec<Education>>,
    #[serde(default)]
    pub disabilities: Option<Vec<Disability>>,
    #[serde(default)]
    pub max_income: Option<f64>,
    #[serde(default)]
    pub states: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bpl_only: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minority_only: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Scheme {
    /// Scheme with no eligibility constraints; every constraint field is inactive.
    pub fn unrestricted(
        id: impl Into<String>,
        name: impl Into<String>,
        ministry: impl Into<String>,
    ) -> Self {
        Self {
            id: SchemeId(id.into()),
            name: name.into(),
            ministry: ministry.into(),
            description: None,
            benefits: None,
            documents_required: None,
            application_url: None,
            application_deadline: None,
            min_age: None,
            max_age: None,
            gender: None,
            categories: None,
            occupations: None,
            education_levels: None,
            disabilities: None,
            max_income: None,
            states: None,
            bpl_only: false,
            minority_only: false,
            is_active: true,
        }
    }
}
