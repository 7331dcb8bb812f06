use transistor::{BitWidth, Bitmask, BitmaskCast, BitmaskColumns, Flags, Query};

#[derive(Flags, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Permission {
    Read = 1,
    Write = 2,
    Delete = 4,
    Admin = 8,
}

/// Record as it would come back from storage.
#[derive(Debug)]
struct User {
    permissions: Option<Bitmask>,
    settings: Option<Bitmask>,
}

const PERMISSIONS: BitmaskCast = BitmaskCast::new(BitWidth::Regular);
const SETTINGS: BitmaskCast = BitmaskCast::new(BitWidth::Tiny);

impl User {
    fn load(permissions: Option<i64>, settings: Option<i64>) -> Self {
        Self {
            permissions: PERMISSIONS.get(permissions).unwrap(),
            settings: SETTINGS.get(settings).unwrap(),
        }
    }
}

impl BitmaskColumns for User {
    fn bitmask_column(&self, column: &str) -> Option<u64> {
        match column {
            "permissions" => self.permissions.map(u64::from),
            "settings" => self.settings.map(u64::from),
            _ => None,
        }
    }
}

fn users() -> Vec<User> {
    [1, 3, 8, 9, 0]
        .into_iter()
        .map(|p| User::load(Some(p), Some(0)))
        .collect()
}

fn permission_values(query: &Query, users: &[User]) -> Vec<u32> {
    query
        .filter(users)
        .filter_map(|u| u.permissions)
        .map(Bitmask::value)
        .collect()
}

#[test]
fn filters_by_single_flag() {
    let query = Query::new().where_has_flag("permissions", Permission::Read);
    assert_eq!(permission_values(&query, &users()), [1, 3, 9]);
}

#[test]
fn filters_by_all_flags() {
    let query =
        Query::new().where_has_all_flags("permissions", [Permission::Read, Permission::Write]);
    assert_eq!(permission_values(&query, &users()), [3]);
}

#[test]
fn filters_by_any_flag() {
    let query =
        Query::new().where_has_any_flag("permissions", [Permission::Write, Permission::Admin]);
    assert_eq!(permission_values(&query, &users()), [3, 8, 9]);
}

#[test]
fn filters_by_missing_flag() {
    let query = Query::new().where_doesnt_have_flag("permissions", Permission::Admin);
    assert_eq!(permission_values(&query, &users()), [1, 3, 0]);
}

#[test]
fn filters_by_missing_any_flags() {
    let query = Query::new()
        .where_doesnt_have_any_flag("permissions", [Permission::Read, Permission::Write]);
    assert_eq!(permission_values(&query, &users()), [8, 0]);
}

#[test]
fn filters_with_integer_flags() {
    let query = Query::new().where_has_flag("permissions", 1);
    assert_eq!(query.filter(&users()).count(), 3);
}

#[test]
fn chains_scopes() {
    let query = Query::new()
        .where_has_flag("permissions", Permission::Read)
        .where_doesnt_have_flag("permissions", Permission::Admin);
    assert_eq!(permission_values(&query, &users()), [1, 3]);
}

#[test]
fn null_columns_are_excluded() {
    let mut rows = users();
    rows.push(User::load(None, Some(1)));

    let query = Query::new().where_doesnt_have_flag("permissions", Permission::Admin);
    assert_eq!(query.filter(&rows).count(), 3);

    let query = Query::new().where_has_flag("settings", 1);
    assert_eq!(query.filter(&rows).count(), 1);
}

#[test]
fn cast_preserves_operations_through_save_cycle() {
    let user = User::load(Some(0), Some(0));
    let updated = user
        .permissions
        .unwrap()
        .set(Permission::Read)
        .set(Permission::Write);

    let stored = PERMISSIONS.set(Some(updated));
    assert_eq!(stored, Some(3));

    let fresh = User::load(stored, Some(0));
    let permissions = fresh.permissions.unwrap();
    assert!(permissions.has(Permission::Read));
    assert!(permissions.has(Permission::Write));
    assert!(!permissions.has(Permission::Delete));
}

#[test]
fn tiny_column_uses_tiny_width() {
    let user = User::load(Some(0), Some(127));
    assert_eq!(user.settings.unwrap().size(), BitWidth::Tiny);
    assert_eq!(user.settings.unwrap().size().bits(), 8);
}
