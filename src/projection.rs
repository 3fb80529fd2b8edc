//! Member-content projection.
//!
//! Exposes a member's built-in profile fields and custom content properties
//! through one explicit name → value map, built once at construction. Both
//! the declared casing and its counterpart (lower-camel for built-ins,
//! Pascal for custom aliases) resolve to the same value, so template code
//! can write `d.Email` or `d.email` interchangeably.

use std::collections::HashMap;

use time::OffsetDateTime;

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Flag(bool),
    Timestamp(OffsetDateTime),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

/// Built-in membership-provider fields of one member.
#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub name: String,
    pub user_name: String,
    pub email: String,
    pub comments: String,
    pub password_question: String,
    pub is_approved: bool,
    pub is_locked_out: bool,
    pub creation_date: OffsetDateTime,
    pub last_activity_date: OffsetDateTime,
    pub last_lockout_date: OffsetDateTime,
    pub last_login_date: OffsetDateTime,
    pub last_password_changed_date: OffsetDateTime,
}

/// A member projected as content: built-ins plus custom properties behind a
/// single property map.
pub struct MemberContent {
    properties: HashMap<String, PropertyValue>,
}

impl MemberContent {
    pub fn new(
        profile: MemberProfile,
        custom: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut properties = HashMap::new();

        let built_ins = [
            ("Name", PropertyValue::Text(profile.name)),
            ("UserName", PropertyValue::Text(profile.user_name)),
            ("Email", PropertyValue::Text(profile.email)),
            ("Comments", PropertyValue::Text(profile.comments)),
            (
                "PasswordQuestion",
                PropertyValue::Text(profile.password_question),
            ),
            ("IsApproved", PropertyValue::Flag(profile.is_approved)),
            ("IsLockedOut", PropertyValue::Flag(profile.is_locked_out)),
            (
                "CreationDate",
                PropertyValue::Timestamp(profile.creation_date),
            ),
            (
                "LastActivityDate",
                PropertyValue::Timestamp(profile.last_activity_date),
            ),
            (
                "LastLockoutDate",
                PropertyValue::Timestamp(profile.last_lockout_date),
            ),
            (
                "LastLoginDate",
                PropertyValue::Timestamp(profile.last_login_date),
            ),
            (
                "LastPasswordChangedDate",
                PropertyValue::Timestamp(profile.last_password_changed_date),
            ),
        ];

        for (name, value) in built_ins {
            insert_both_casings(&mut properties, name, value);
        }

        for (alias, value) in custom {
            insert_both_casings(&mut properties, &alias, PropertyValue::Text(value));
        }

        Self { properties }
    }

    /// Look up a property by name. Both the declared casing and its
    /// alternate first-letter casing were inserted at construction, so this
    /// is a plain map lookup.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Insert the value under the given name and under the same name with the
/// first letter's casing flipped to the other convention.
fn insert_both_casings(
    properties: &mut HashMap<String, PropertyValue>,
    name: &str,
    value: PropertyValue,
) {
    properties.insert(lower_camel(name), value.clone());
    properties.insert(pascal(name), value);
}

fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pascal(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
