use tracing::{debug, info, warn};

use super::Ensured;
use crate::error::Result;
use crate::store::Store;
use crate::types::{AuthorizationProvider, Role, RoleArchetype};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinRole {
    pub priority: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub archetype: RoleArchetype,
}

/// Roles seeded into an empty store, in creation order.
pub const BUILTIN_ROLES: [BuiltinRole; 4] = [
    BuiltinRole {
        priority: 1,
        name: "Endpoint administrator",
        description: "Full control of all resources in an endpoint",
        archetype: RoleArchetype::Administrator,
    },
    BuiltinRole {
        priority: 2,
        name: "Helpdesk",
        description: "Read-only access of all resources in an endpoint",
        archetype: RoleArchetype::Helpdesk,
    },
    BuiltinRole {
        priority: 3,
        name: "Standard user",
        description: "Full control of assigned resources in an endpoint",
        archetype: RoleArchetype::StandardUser,
    },
    BuiltinRole {
        priority: 4,
        name: "Read-only user",
        description: "Read-only access of assigned resources in an endpoint",
        archetype: RoleArchetype::ReadOnlyUser,
    },
];

impl BuiltinRole {
    #[must_use]
    pub fn to_role<P: AuthorizationProvider + ?Sized>(&self, provider: &P) -> Role {
        Role {
            id: 0,
            name: self.name.to_string(),
            description: self.description.to_string(),
            priority: self.priority,
            authorizations: provider.authorizations_for(self.archetype),
        }
    }
}

/// Seeds the built-in role catalog when no roles exist at all.
///
/// Roles are created one at a time. A failure part way through leaves the
/// roles created so far in place.
pub fn ensure_roles<S, P>(store: &S, provider: &P) -> Result<Ensured>
where
    S: Store + ?Sized,
    P: AuthorizationProvider + ?Sized,
{
    let roles = store.roles()?;
    if !roles.is_empty() {
        debug!(count = roles.len(), "Roles already present");
        return Ok(Ensured::Existing);
    }

    for (created, builtin) in BUILTIN_ROLES.iter().enumerate() {
        match store.create_role(&builtin.to_role(provider)) {
            Ok(id) => info!(role_id = id, role = builtin.name, "Created built-in role"),
            Err(e) => {
                if created > 0 {
                    warn!(
                        created,
                        failed = builtin.name,
                        "Built-in role catalog left incomplete"
                    );
                }
                return Err(e);
            }
        }
    }

    Ok(Ensured::Created)
}
