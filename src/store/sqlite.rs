use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

const INSTANCE_ID_KEY: &str = "instance_id";
const SETTINGS_KEY: &str = "settings";
const REGISTRY_CREDENTIALS_KEY: &str = "registry_credentials";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn get_singleton<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value: Option<String> = self
            .conn()
            .query_row(
                "SELECT value FROM singletons WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(Error::NotFound),
        }
    }

    fn insert_singleton<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        let result = self.conn().execute(
            "INSERT INTO singletons (key, value) VALUES (?1, ?2)",
            params![key, json],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    fn upsert_singleton<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn().execute(
            "INSERT INTO singletons (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![key, json],
        )?;
        Ok(())
    }
}

fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn resource_group_from_row(row: &Row<'_>) -> rusqlite::Result<ResourceGroup> {
    Ok(ResourceGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        labels: json_column(row, 3)?,
        user_access_policies: json_column(row, 4)?,
        team_access_policies: json_column(row, 5)?,
        tag_ids: json_column(row, 6)?,
    })
}

fn role_from_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        authorizations: Authorizations::from(row.get::<_, i64>(4)? as u64),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Instance identity

    fn instance_id(&self) -> Result<String> {
        self.get_singleton(INSTANCE_ID_KEY)
    }

    fn store_instance_id(&self, id: &str) -> Result<()> {
        self.insert_singleton(INSTANCE_ID_KEY, &id)
    }

    // Settings

    fn settings(&self) -> Result<Settings> {
        self.get_singleton(SETTINGS_KEY)
    }

    fn create_settings(&self, settings: &Settings) -> Result<()> {
        self.insert_singleton(SETTINGS_KEY, settings)
    }

    fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.upsert_singleton(SETTINGS_KEY, settings)
    }

    // Registry credentials

    fn registry_credentials(&self) -> Result<RegistryCredentials> {
        self.get_singleton(REGISTRY_CREDENTIALS_KEY)
    }

    fn create_registry_credentials(&self, credentials: &RegistryCredentials) -> Result<()> {
        self.insert_singleton(REGISTRY_CREDENTIALS_KEY, credentials)
    }

    fn update_registry_credentials(&self, credentials: &RegistryCredentials) -> Result<()> {
        self.upsert_singleton(REGISTRY_CREDENTIALS_KEY, credentials)
    }

    // Resource group operations

    fn resource_groups(&self) -> Result<Vec<ResourceGroup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, labels, user_access_policies, team_access_policies, tag_ids
             FROM resource_groups ORDER BY id",
        )?;

        let rows = stmt.query_map([], resource_group_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn resource_group(&self, id: i64) -> Result<ResourceGroup> {
        self.conn()
            .query_row(
                "SELECT id, name, description, labels, user_access_policies, team_access_policies, tag_ids
                 FROM resource_groups WHERE id = ?1",
                params![id],
                resource_group_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound)
    }

    fn create_resource_group(&self, group: &ResourceGroup) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO resource_groups (name, description, labels, user_access_policies, team_access_policies, tag_ids)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                group.name,
                group.description,
                serde_json::to_string(&group.labels)?,
                serde_json::to_string(&group.user_access_policies)?,
                serde_json::to_string(&group.team_access_policies)?,
                serde_json::to_string(&group.tag_ids)?,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // Role operations

    fn roles(&self) -> Result<Vec<Role>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, description, priority, authorizations FROM roles ORDER BY id",
        )?;

        let rows = stmt.query_map([], role_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn role(&self, id: i64) -> Result<Role> {
        self.conn()
            .query_row(
                "SELECT id, name, description, priority, authorizations FROM roles WHERE id = ?1",
                params![id],
                role_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound)
    }

    fn create_role(&self, role: &Role) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO roles (name, description, priority, authorizations) VALUES (?1, ?2, ?3, ?4)",
            params![
                role.name,
                role.description,
                role.priority,
                role.authorizations.bits() as i64,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn test_initialize_creates_tables() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"singletons".to_string()));
        assert!(tables.contains(&"resource_groups".to_string()));
        assert!(tables.contains(&"roles".to_string()));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        store.store_instance_id("abc").unwrap();
        store.initialize().unwrap();
        assert_eq!(store.instance_id().unwrap(), "abc");
    }

    #[test]
    fn test_missing_singletons_are_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize().unwrap();

        assert!(matches!(store.instance_id(), Err(Error::NotFound)));
        assert!(matches!(store.settings(), Err(Error::NotFound)));
        assert!(matches!(store.registry_credentials(), Err(Error::NotFound)));
    }

    #[test]
    fn test_singleton_create_does_not_replace() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.store_instance_id("first").unwrap();
        let result = store.store_instance_id("second");
        assert!(matches!(result, Err(Error::AlreadyExists)));
        assert_eq!(store.instance_id().unwrap(), "first");
    }

    #[test]
    fn test_registry_credentials_update_replaces() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store
            .create_registry_credentials(&RegistryCredentials::default())
            .unwrap();

        let custom = RegistryCredentials {
            authentication: true,
            username: "deploy".to_string(),
            password: "hunter2".to_string(),
        };
        store.update_registry_credentials(&custom).unwrap();
        assert_eq!(store.registry_credentials().unwrap(), custom);
    }

    #[test]
    fn test_resource_group_crud() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let mut group = ResourceGroup::new("edge", "Edge devices");
        group.labels.push(Pair {
            name: "site".to_string(),
            value: "north".to_string(),
        });
        group.user_access_policies.insert(7, AccessPolicy { role_id: 3 });
        group.tag_ids.push(2);

        let id = store.create_resource_group(&group).unwrap();
        assert!(id > 0);

        let fetched = store.resource_group(id).unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name, "edge");
        assert_eq!(fetched.labels, group.labels);
        assert_eq!(fetched.user_access_policies, group.user_access_policies);
        assert_eq!(fetched.tag_ids, vec![2]);

        assert_eq!(store.resource_groups().unwrap(), vec![fetched]);
        assert!(matches!(store.resource_group(id + 1), Err(Error::NotFound)));
    }

    #[test]
    fn test_role_authorizations_survive_storage() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let role = Role {
            id: 0,
            name: "Operator".to_string(),
            description: "Keeps the lights on".to_string(),
            priority: 5,
            authorizations: Authorizations::all(),
        };

        let id = store.create_role(&role).unwrap();
        let fetched = store.role(id).unwrap();
        assert_eq!(fetched.authorizations, Authorizations::all());
        assert_eq!(fetched.priority, 5);
        assert_eq!(store.roles().unwrap(), vec![fetched]);
        assert!(matches!(store.role(id + 1), Err(Error::NotFound)));
    }
}
