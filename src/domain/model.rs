use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single raw ticket id as written in a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Unsigned(value) => write!(f, "{}", value),
            // `{:?}` keeps the fractional part, so 2.0 stays "2.0"
            Scalar::Float(value) => write!(f, "{:?}", value),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value.into())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Unsigned(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// The value side of `tool=...` in a marker: one id or a list of ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketValues {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl TicketValues {
    pub fn as_slice(&self) -> &[Scalar] {
        match self {
            TicketValues::One(value) => std::slice::from_ref(value),
            TicketValues::Many(values) => values,
        }
    }
}

impl From<Scalar> for TicketValues {
    fn from(value: Scalar) -> Self {
        TicketValues::One(value)
    }
}

impl From<i64> for TicketValues {
    fn from(value: i64) -> Self {
        TicketValues::One(value.into())
    }
}

impl From<i32> for TicketValues {
    fn from(value: i32) -> Self {
        TicketValues::One(value.into())
    }
}

impl From<u64> for TicketValues {
    fn from(value: u64) -> Self {
        TicketValues::One(value.into())
    }
}

impl From<f64> for TicketValues {
    fn from(value: f64) -> Self {
        TicketValues::One(value.into())
    }
}

impl From<&str> for TicketValues {
    fn from(value: &str) -> Self {
        TicketValues::One(value.into())
    }
}

impl From<String> for TicketValues {
    fn from(value: String) -> Self {
        TicketValues::One(value.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for TicketValues {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Into<Scalar>> FromIterator<T> for TicketValues {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TicketValues::Many(iter.into_iter().map(Into::into).collect())
    }
}

/// One `ticket(...)` marker: tool names mapped to raw ids.
///
/// [`TicketMarker::with`] keeps tools in insertion order. A deserialized
/// marker goes through a map and lists its tools sorted by name, so the
/// first unknown tool reported is the alphabetically first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, TicketValues>", into = "BTreeMap<String, TicketValues>")]
pub struct TicketMarker {
    kwargs: Vec<(String, TicketValues)>,
}

impl TicketMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tool: impl Into<String>, values: impl Into<TicketValues>) -> Self {
        self.kwargs.push((tool.into(), values.into()));
        self
    }

    pub fn kwargs(&self) -> impl Iterator<Item = (&str, &TicketValues)> {
        self.kwargs.iter().map(|(tool, values)| (tool.as_str(), values))
    }

    pub fn is_empty(&self) -> bool {
        self.kwargs.is_empty()
    }
}

impl From<BTreeMap<String, TicketValues>> for TicketMarker {
    fn from(map: BTreeMap<String, TicketValues>) -> Self {
        Self {
            kwargs: map.into_iter().collect(),
        }
    }
}

impl From<TicketMarker> for BTreeMap<String, TicketValues> {
    fn from(marker: TicketMarker) -> Self {
        marker.kwargs.into_iter().collect()
    }
}

/// Normalized `tool#id` reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketReference(String);

impl TicketReference {
    pub fn new(tool: &str, id: &Scalar) -> Self {
        Self(format!("{}#{}", tool, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sorted tickets of one test item. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TicketSet(Vec<TicketReference>);

impl TicketSet {
    pub fn from_unsorted(mut tickets: Vec<TicketReference>) -> Self {
        tickets.sort();
        Self(tickets)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TicketReference> {
        self.0.iter()
    }

    /// Human readable form used in reports, e.g. `gh#1113, tracker#1111`.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(TicketReference::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn matches_any(&self, filter: &FilterList) -> bool {
        self.0.iter().any(|ticket| filter.contains(ticket.as_str()))
    }
}

/// Ticket tools allowed in markers for this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSet(Vec<String>);

impl ToolSet {
    pub fn new<I, S>(tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tools.into_iter().map(Into::into).collect())
    }

    /// Parses `"bz, gh,,jira"` into `["bz", "gh", "jira"]`.
    pub fn from_comma_separated(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|tool| !tool.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, tool: &str) -> bool {
        self.0.iter().any(|known| known == tool)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw `--ticket` values. Compared verbatim against normalized tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterList(Vec<String>);

impl FilterList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ticket: &str) -> bool {
        self.0.iter().any(|entry| entry == ticket)
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }
}
