//! Capability tags and the fixed-size permission set.
//!
//! A [`PermissionSet`] is a bit set keyed by the closed [`Permission`]
//! enumeration. PostgreSQL stores it as a `TEXT[]` of permission names so
//! the column stays readable; names that are not part of the enumeration
//! fail to decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use shophub_core::error::AppError;

/// A capability tag that can be granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    /// Full administrator; satisfies every admin-gated check.
    Admin,
    /// Default capability of every registered user.
    User,
    /// May create items.
    ItemCreate,
    /// May edit items owned by others.
    ItemUpdate,
    /// May delete items owned by others.
    ItemDelete,
    /// May list users and change their permissions.
    PermissionUpdate,
}

impl Permission {
    /// Every permission, in bit order.
    pub const ALL: [Permission; 6] = [
        Self::Admin,
        Self::User,
        Self::ItemCreate,
        Self::ItemUpdate,
        Self::ItemDelete,
        Self::PermissionUpdate,
    ];

    fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Return the wire name of the permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
            Self::ItemCreate => "ITEMCREATE",
            Self::ItemUpdate => "ITEMUPDATE",
            Self::ItemDelete => "ITEMDELETE",
            Self::PermissionUpdate => "PERMISSIONUPDATE",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid permission: '{s}'. Expected one of: ADMIN, USER, ITEMCREATE, \
                     ITEMUPDATE, ITEMDELETE, PERMISSIONUPDATE"
                ))
            })
    }
}

/// A set of [`Permission`]s backed by a bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(u32);

impl PermissionSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set granted to every new account: `{USER}`.
    pub fn new_user() -> Self {
        Self::of(&[Permission::User])
    }

    /// Build a set from a slice of permissions.
    pub fn of(permissions: &[Permission]) -> Self {
        permissions.iter().copied().collect()
    }

    /// Parse a set from permission names, rejecting unknown names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, AppError> {
        names
            .iter()
            .map(|n| n.as_ref().parse::<Permission>())
            .collect()
    }

    /// Add a permission.
    pub fn insert(&mut self, permission: Permission) {
        self.0 |= permission.bit();
    }

    /// Remove a permission.
    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !permission.bit();
    }

    /// Whether the set holds `permission`.
    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    /// Whether the two sets share at least one permission.
    pub fn intersects(&self, other: &PermissionSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of permissions in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the permissions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }

    /// Permission names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names().join(", "))
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let list = Vec::<Permission>::deserialize(deserializer)?;
        Ok(list.into_iter().collect())
    }
}

impl sqlx::Type<sqlx::Postgres> for PermissionSet {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Vec<String> as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Vec<String> as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for PermissionSet {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Vec<String> as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.names(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PermissionSet {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let names = <Vec<String> as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_names(&names)?)
    }
}
