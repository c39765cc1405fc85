//! Service and method identifier tables.
//!
//! IDs are computed once per package, in tree order, so that index `i` of a
//! service's method IDs always belongs to `service.methods[i]`.

use indexmap::IndexMap;
use rpcgen_core::{IdHasher, format_id};
use rpcgen_ir::Package;
use serde::{Serialize, Serializer};

use crate::{CollisionPolicy, GenerateError, Result};

/// IDs of every service and method in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageIds {
    pub package: String,
    pub services: Vec<ServiceIds>,
}

/// IDs of a service and its methods, in method order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceIds {
    pub path: String,
    #[serde(serialize_with = "serialize_id")]
    pub id: u32,
    pub methods: Vec<MethodId>,
}

/// ID of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodId {
    pub name: String,
    #[serde(serialize_with = "serialize_id")]
    pub id: u32,
}

fn serialize_id<S>(id: &u32, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_id(*id))
}

impl PackageIds {
    /// Hash every service path and method name of a package.
    ///
    /// Collisions between different names are handled according to
    /// `policy`. Repeated names are not collisions.
    pub fn compute<H>(package: &Package, hasher: &H, policy: CollisionPolicy) -> Result<Self>
    where
        H: IdHasher + ?Sized,
    {
        let mut service_ids: IndexMap<u32, &str> = IndexMap::new();
        let mut services = Vec::with_capacity(package.services.len());

        for service in &package.services {
            let id = hasher.hash(&service.path);
            if let Some(first) = first_collision(&mut service_ids, id, &service.path) {
                let err = GenerateError::ServiceIdCollision {
                    package: package.name.clone(),
                    first: first.to_string(),
                    second: service.path.clone(),
                    id,
                };
                report(policy, err)?;
            }

            let mut method_ids: IndexMap<u32, &str> = IndexMap::new();
            let mut methods = Vec::with_capacity(service.methods.len());

            for method in &service.methods {
                let method_id = hasher.hash(&method.name);
                if let Some(first) = first_collision(&mut method_ids, method_id, &method.name) {
                    let err = GenerateError::MethodIdCollision {
                        service: service.path.clone(),
                        first: first.to_string(),
                        second: method.name.clone(),
                        id: method_id,
                    };
                    report(policy, err)?;
                }
                methods.push(MethodId {
                    name: method.name.clone(),
                    id: method_id,
                });
            }

            services.push(ServiceIds {
                path: service.path.clone(),
                id,
                methods,
            });
        }

        Ok(Self {
            package: package.name.clone(),
            services,
        })
    }

    /// Render the table as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Record `name` under `id`, returning the earlier name if a different one
/// already claimed it.
fn first_collision<'a>(
    seen: &mut IndexMap<u32, &'a str>,
    id: u32,
    name: &'a str,
) -> Option<&'a str> {
    match seen.get(&id) {
        Some(&first) if first != name => Some(first),
        Some(_) => None,
        None => {
            seen.insert(id, name);
            None
        }
    }
}

fn report(policy: CollisionPolicy, err: GenerateError) -> Result<()> {
    match policy {
        CollisionPolicy::Reject => Err(err),
        CollisionPolicy::Warn => {
            tracing::warn!("{err}");
            Ok(())
        }
        CollisionPolicy::Ignore => Ok(()),
    }
}
