use std::fmt;

use serde::{Deserialize, Serialize};

/// Authorizations is a bitmask of fine-grained endpoint operations granted by a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authorizations(u64);

/// Name and flag of every known operation, in bit order.
const CATALOG: &[(&str, Authorizations)] = &[
    ("container:list", Authorizations::CONTAINER_LIST),
    ("container:inspect", Authorizations::CONTAINER_INSPECT),
    ("container:logs", Authorizations::CONTAINER_LOGS),
    ("container:create", Authorizations::CONTAINER_CREATE),
    ("container:start", Authorizations::CONTAINER_START),
    ("container:stop", Authorizations::CONTAINER_STOP),
    ("container:delete", Authorizations::CONTAINER_DELETE),
    ("container:exec", Authorizations::CONTAINER_EXEC),
    ("image:list", Authorizations::IMAGE_LIST),
    ("image:inspect", Authorizations::IMAGE_INSPECT),
    ("image:pull", Authorizations::IMAGE_PULL),
    ("image:build", Authorizations::IMAGE_BUILD),
    ("image:delete", Authorizations::IMAGE_DELETE),
    ("network:list", Authorizations::NETWORK_LIST),
    ("network:inspect", Authorizations::NETWORK_INSPECT),
    ("network:create", Authorizations::NETWORK_CREATE),
    ("network:delete", Authorizations::NETWORK_DELETE),
    ("volume:list", Authorizations::VOLUME_LIST),
    ("volume:inspect", Authorizations::VOLUME_INSPECT),
    ("volume:create", Authorizations::VOLUME_CREATE),
    ("volume:delete", Authorizations::VOLUME_DELETE),
    ("service:list", Authorizations::SERVICE_LIST),
    ("service:inspect", Authorizations::SERVICE_INSPECT),
    ("service:create", Authorizations::SERVICE_CREATE),
    ("service:update", Authorizations::SERVICE_UPDATE),
    ("service:delete", Authorizations::SERVICE_DELETE),
    ("stack:list", Authorizations::STACK_LIST),
    ("stack:inspect", Authorizations::STACK_INSPECT),
    ("stack:deploy", Authorizations::STACK_DEPLOY),
    ("stack:delete", Authorizations::STACK_DELETE),
    ("secret:list", Authorizations::SECRET_LIST),
    ("secret:inspect", Authorizations::SECRET_INSPECT),
    ("secret:create", Authorizations::SECRET_CREATE),
    ("secret:delete", Authorizations::SECRET_DELETE),
    ("config:list", Authorizations::CONFIG_LIST),
    ("config:inspect", Authorizations::CONFIG_INSPECT),
    ("config:create", Authorizations::CONFIG_CREATE),
    ("config:delete", Authorizations::CONFIG_DELETE),
    ("node:list", Authorizations::NODE_LIST),
    ("node:inspect", Authorizations::NODE_INSPECT),
    ("node:update", Authorizations::NODE_UPDATE),
    ("node:delete", Authorizations::NODE_DELETE),
    ("host:info", Authorizations::HOST_INFO),
    ("host:browse", Authorizations::HOST_BROWSE),
    ("host:manage", Authorizations::HOST_MANAGE),
    ("endpoint:resource-control", Authorizations::ENDPOINT_RESOURCE_CONTROL),
];

impl Authorizations {
    pub const CONTAINER_LIST: Authorizations = Authorizations(1 << 0);
    pub const CONTAINER_INSPECT: Authorizations = Authorizations(1 << 1);
    pub const CONTAINER_LOGS: Authorizations = Authorizations(1 << 2);
    pub const CONTAINER_CREATE: Authorizations = Authorizations(1 << 3);
    pub const CONTAINER_START: Authorizations = Authorizations(1 << 4);
    pub const CONTAINER_STOP: Authorizations = Authorizations(1 << 5);
    pub const CONTAINER_DELETE: Authorizations = Authorizations(1 << 6);
    pub const CONTAINER_EXEC: Authorizations = Authorizations(1 << 7);

    pub const IMAGE_LIST: Authorizations = Authorizations(1 << 8);
    pub const IMAGE_INSPECT: Authorizations = Authorizations(1 << 9);
    pub const IMAGE_PULL: Authorizations = Authorizations(1 << 10);
    pub const IMAGE_BUILD: Authorizations = Authorizations(1 << 11);
    pub const IMAGE_DELETE: Authorizations = Authorizations(1 << 12);

    pub const NETWORK_LIST: Authorizations = Authorizations(1 << 13);
    pub const NETWORK_INSPECT: Authorizations = Authorizations(1 << 14);
    pub const NETWORK_CREATE: Authorizations = Authorizations(1 << 15);
    pub const NETWORK_DELETE: Authorizations = Authorizations(1 << 16);

    pub const VOLUME_LIST: Authorizations = Authorizations(1 << 17);
    pub const VOLUME_INSPECT: Authorizations = Authorizations(1 << 18);
    pub const VOLUME_CREATE: Authorizations = Authorizations(1 << 19);
    pub const VOLUME_DELETE: Authorizations = Authorizations(1 << 20);

    pub const SERVICE_LIST: Authorizations = Authorizations(1 << 21);
    pub const SERVICE_INSPECT: Authorizations = Authorizations(1 << 22);
    pub const SERVICE_CREATE: Authorizations = Authorizations(1 << 23);
    pub const SERVICE_UPDATE: Authorizations = Authorizations(1 << 24);
    pub const SERVICE_DELETE: Authorizations = Authorizations(1 << 25);

    pub const STACK_LIST: Authorizations = Authorizations(1 << 26);
    pub const STACK_INSPECT: Authorizations = Authorizations(1 << 27);
    pub const STACK_DEPLOY: Authorizations = Authorizations(1 << 28);
    pub const STACK_DELETE: Authorizations = Authorizations(1 << 29);

    pub const SECRET_LIST: Authorizations = Authorizations(1 << 30);
    pub const SECRET_INSPECT: Authorizations = Authorizations(1 << 31);
    pub const SECRET_CREATE: Authorizations = Authorizations(1 << 32);
    pub const SECRET_DELETE: Authorizations = Authorizations(1 << 33);

    pub const CONFIG_LIST: Authorizations = Authorizations(1 << 34);
    pub const CONFIG_INSPECT: Authorizations = Authorizations(1 << 35);
    pub const CONFIG_CREATE: Authorizations = Authorizations(1 << 36);
    pub const CONFIG_DELETE: Authorizations = Authorizations(1 << 37);

    // Swarm nodes and the docker host itself are endpoint-wide resources,
    // never owned by a single user.
    pub const NODE_LIST: Authorizations = Authorizations(1 << 38);
    pub const NODE_INSPECT: Authorizations = Authorizations(1 << 39);
    pub const NODE_UPDATE: Authorizations = Authorizations(1 << 40);
    pub const NODE_DELETE: Authorizations = Authorizations(1 << 41);
    pub const HOST_INFO: Authorizations = Authorizations(1 << 42);
    pub const HOST_BROWSE: Authorizations = Authorizations(1 << 43);
    pub const HOST_MANAGE: Authorizations = Authorizations(1 << 44);
    pub const ENDPOINT_RESOURCE_CONTROL: Authorizations = Authorizations(1 << 45);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Every operation in the catalog.
    #[must_use]
    pub fn all() -> Authorizations {
        CATALOG
            .iter()
            .fold(Authorizations::empty(), |acc, (_, flag)| acc.union(*flag))
    }

    /// Operations that only observe state.
    #[must_use]
    pub fn read_only() -> Authorizations {
        CATALOG
            .iter()
            .filter(|(name, _)| is_read_operation(name))
            .fold(Authorizations::empty(), |acc, (_, flag)| acc.union(*flag))
    }

    /// Operations on resources that can be owned by a user or team, as
    /// opposed to endpoint-wide infrastructure.
    #[must_use]
    pub fn workload() -> Authorizations {
        Authorizations::all().difference(Authorizations::endpoint_wide())
    }

    #[must_use]
    pub const fn endpoint_wide() -> Authorizations {
        Authorizations(
            Self::NODE_LIST.0
                | Self::NODE_INSPECT.0
                | Self::NODE_UPDATE.0
                | Self::NODE_DELETE.0
                | Self::HOST_INFO.0
                | Self::HOST_BROWSE.0
                | Self::HOST_MANAGE.0
                | Self::ENDPOINT_RESOURCE_CONTROL.0,
        )
    }

    /// Returns true if every operation in `required` is granted.
    #[must_use]
    pub const fn has(self, required: Authorizations) -> bool {
        self.0 & required.0 == required.0
    }

    #[must_use]
    pub const fn union(self, other: Authorizations) -> Authorizations {
        Authorizations(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Authorizations) -> Authorizations {
        Authorizations(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: Authorizations) -> Authorizations {
        Authorizations(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Converts an operation name to its flag.
    pub fn parse(s: &str) -> Option<Authorizations> {
        CATALOG
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, flag)| *flag)
    }

    #[must_use]
    pub fn to_strings(self) -> Vec<&'static str> {
        CATALOG
            .iter()
            .filter(|(_, flag)| self.has(*flag))
            .map(|(name, _)| *name)
            .collect()
    }
}

fn is_read_operation(name: &str) -> bool {
    matches!(
        name.rsplit(':').next(),
        Some("list" | "inspect" | "logs" | "info" | "browse")
    )
}

impl fmt::Display for Authorizations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strings().join(", "))
    }
}

impl From<u64> for Authorizations {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Authorizations> for u64 {
    fn from(a: Authorizations) -> Self {
        a.0
    }
}

/// The fixed built-in role identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleArchetype {
    Administrator,
    Helpdesk,
    StandardUser,
    ReadOnlyUser,
}

impl RoleArchetype {
    pub const ALL: [RoleArchetype; 4] = [
        RoleArchetype::Administrator,
        RoleArchetype::Helpdesk,
        RoleArchetype::StandardUser,
        RoleArchetype::ReadOnlyUser,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RoleArchetype::Administrator => "administrator",
            RoleArchetype::Helpdesk => "helpdesk",
            RoleArchetype::StandardUser => "standard-user",
            RoleArchetype::ReadOnlyUser => "read-only-user",
        }
    }
}

impl fmt::Display for RoleArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces the default permission set of each built-in role.
pub trait AuthorizationProvider {
    fn authorizations_for(&self, archetype: RoleArchetype) -> Authorizations;
}

/// The stock permission sets shipped with the control plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAuthorizations;

impl DefaultAuthorizations {
    /// Full control of all resources in an endpoint.
    #[must_use]
    pub fn endpoint_administrator() -> Authorizations {
        Authorizations::all()
    }

    /// Read-only access of all resources in an endpoint.
    #[must_use]
    pub fn helpdesk() -> Authorizations {
        Authorizations::read_only()
    }

    /// Full control of assigned resources in an endpoint.
    #[must_use]
    pub fn standard_user() -> Authorizations {
        Authorizations::workload()
    }

    /// Read-only access of assigned resources in an endpoint.
    #[must_use]
    pub fn read_only_user() -> Authorizations {
        Authorizations::workload().intersection(Authorizations::read_only())
    }
}

impl AuthorizationProvider for DefaultAuthorizations {
    fn authorizations_for(&self, archetype: RoleArchetype) -> Authorizations {
        match archetype {
            RoleArchetype::Administrator => Self::endpoint_administrator(),
            RoleArchetype::Helpdesk => Self::helpdesk(),
            RoleArchetype::StandardUser => Self::standard_user(),
            RoleArchetype::ReadOnlyUser => Self::read_only_user(),
        }
    }
}
