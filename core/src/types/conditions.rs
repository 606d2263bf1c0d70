//! Condition records and the people-condition builders.
//!
//! # Design
//! The remote schema lets a people condition name either users or groups,
//! and each of those either an include list or an exclude list, but never
//! both. `Selection` and `PeopleCondition` are sum types so a request built
//! through them cannot violate that, and decoding a document that carries
//! both halves fails. Responses are decoded into the permissive `People`
//! shape instead, since the server reports every list it stores.
//!
//! The string-taking builders (`users_condition`, `groups_condition`,
//! `people_condition`) are the validation boundary for callers holding raw
//! `"include"` / `"users"` style arguments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Whether a `Selection` includes or excludes its ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Include,
    Exclude,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Include => "include",
            SelectionMode::Exclude => "exclude",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "include" => Ok(SelectionMode::Include),
            "exclude" => Ok(SelectionMode::Exclude),
            other => Err(ApiError::invalid_argument(format!(
                "selection mode must be \"include\" or \"exclude\", got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of a people condition is targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeopleTarget {
    Users,
    Groups,
}

impl PeopleTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeopleTarget::Users => "users",
            PeopleTarget::Groups => "groups",
        }
    }
}

impl FromStr for PeopleTarget {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(PeopleTarget::Users),
            "groups" => Ok(PeopleTarget::Groups),
            other => Err(ApiError::invalid_argument(format!(
                "people target must be \"users\" or \"groups\", got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for PeopleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An include-only or exclude-only list of user or group ids.
///
/// Serializes as `{"include": [...]}` or `{"exclude": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl Selection {
    pub fn new(mode: SelectionMode, ids: Vec<String>) -> Self {
        match mode {
            SelectionMode::Include => Selection::Include(ids),
            SelectionMode::Exclude => Selection::Exclude(ids),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Include(_) => SelectionMode::Include,
            Selection::Exclude(_) => SelectionMode::Exclude,
        }
    }

    pub fn ids(&self) -> &[String] {
        match self {
            Selection::Include(ids) | Selection::Exclude(ids) => ids,
        }
    }

    /// The include list, if this selection includes.
    pub fn included(&self) -> Option<&[String]> {
        match self {
            Selection::Include(ids) => Some(ids),
            Selection::Exclude(_) => None,
        }
    }

    /// The exclude list, if this selection excludes.
    pub fn excluded(&self) -> Option<&[String]> {
        match self {
            Selection::Exclude(ids) => Some(ids),
            Selection::Include(_) => None,
        }
    }
}

/// People condition for request payloads: users or groups, never both.
///
/// Serializes as `{"users": {...}}` or `{"groups": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeopleCondition {
    Users(Selection),
    Groups(Selection),
}

impl PeopleCondition {
    pub fn new(target: PeopleTarget, selection: Selection) -> Self {
        match target {
            PeopleTarget::Users => PeopleCondition::Users(selection),
            PeopleTarget::Groups => PeopleCondition::Groups(selection),
        }
    }

    pub fn target(&self) -> PeopleTarget {
        match self {
            PeopleCondition::Users(_) => PeopleTarget::Users,
            PeopleCondition::Groups(_) => PeopleTarget::Groups,
        }
    }

    pub fn selection(&self) -> &Selection {
        match self {
            PeopleCondition::Users(s) | PeopleCondition::Groups(s) => s,
        }
    }

    pub fn users(&self) -> Option<&Selection> {
        match self {
            PeopleCondition::Users(s) => Some(s),
            PeopleCondition::Groups(_) => None,
        }
    }

    pub fn groups(&self) -> Option<&Selection> {
        match self {
            PeopleCondition::Groups(s) => Some(s),
            PeopleCondition::Users(_) => None,
        }
    }
}

/// Build a Users condition from a raw `"include"` / `"exclude"` mode.
pub fn users_condition<I, S>(mode: &str, ids: I) -> Result<Selection, ApiError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mode: SelectionMode = mode.parse()?;
    Ok(Selection::new(mode, collect_ids(ids)))
}

/// Build a Groups condition from a raw `"include"` / `"exclude"` mode.
pub fn groups_condition<I, S>(mode: &str, ids: I) -> Result<Selection, ApiError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mode: SelectionMode = mode.parse()?;
    Ok(Selection::new(mode, collect_ids(ids)))
}

/// Build a people condition from raw `"users"` / `"groups"` and
/// `"include"` / `"exclude"` arguments. The target is validated first.
pub fn people_condition<I, S>(target: &str, mode: &str, ids: I) -> Result<PeopleCondition, ApiError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let target: PeopleTarget = target.parse()?;
    let selection = match target {
        PeopleTarget::Users => users_condition(mode, ids)?,
        PeopleTarget::Groups => groups_condition(mode, ids)?,
    };
    Ok(PeopleCondition::new(target, selection))
}

fn collect_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}

/// Entities whose conditions carry a people condition.
///
/// Implemented by every policy and rule request variant.
pub trait PeopleConditioned {
    fn people(&self) -> Option<&PeopleCondition>;

    fn set_people(&mut self, people: PeopleCondition);

    /// Validate the raw arguments and replace the people condition.
    ///
    /// On error the entity is left exactly as it was.
    fn set_people_condition<I, S>(&mut self, target: &str, mode: &str, ids: I) -> Result<(), ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        Self: Sized,
    {
        let people = people_condition(target, mode, ids)?;
        self.set_people(people);
        Ok(())
    }
}

/// Include and exclude id lists as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl From<Selection> for IdFilter {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Include(include) => IdFilter {
                include,
                exclude: Vec::new(),
            },
            Selection::Exclude(exclude) => IdFilter {
                include: Vec::new(),
                exclude,
            },
        }
    }
}

/// People condition as found on `Policy` and `Rule` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct People {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<IdFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<IdFilter>,
}

impl From<PeopleCondition> for People {
    fn from(condition: PeopleCondition) -> Self {
        match condition {
            PeopleCondition::Users(s) => People {
                groups: None,
                users: Some(s.into()),
            },
            PeopleCondition::Groups(s) => People {
                groups: Some(s.into()),
                users: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkConnection {
    Anywhere,
    Zone,
    OnNetwork,
    OffNetwork,
}

/// Network condition. `include` and `exclude` name network zones and are
/// only meaningful when `connection` is `ZONE`; at most one is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<NetworkConnection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl NetworkCondition {
    pub fn anywhere() -> Self {
        Self {
            connection: Some(NetworkConnection::Anywhere),
            ..Self::default()
        }
    }

    pub fn zones(selection: Selection) -> Self {
        let IdFilter { include, exclude } = selection.into();
        Self {
            connection: Some(NetworkConnection::Zone),
            include,
            exclude,
        }
    }
}

/// Authentication provider condition of a password policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProviderCondition {
    /// `OKTA` or `ACTIVE_DIRECTORY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}
