//! Composite `left|right` identifiers bound to resource lifecycles.
//!
//! Some backend objects have no identifier of their own and are addressed by
//! a pair of values, e.g. a secret scope and a principal. [`PairId`] names the
//! two fields, and [`PairId::bind_resource`] turns a set of per-pair callbacks
//! into a [`PairResource`] that packs the pair into the Terraform identifier on
//! create and unpacks it again on read and delete.
//!
//! Only the first `|` separates the parts: `a|b|c` unpacks to `("a", "b|c")`.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;

use crate::client::ApiError;
use crate::resource::ResourceData;
use crate::schema::{FieldSchema, Schema, SchemaError};

pub const DELIMITER: char = '|';

#[derive(Debug, Error)]
pub enum PairError {
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("{0} cannot be empty")]
    EmptyField(String),

    #[error("{field} cannot contain '{}': {value}", DELIMITER)]
    DelimiterInLeft { field: String, value: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Callback failure, surfaced verbatim.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PairError {
    /// Errors raised before any callback ran.
    pub fn is_validation(&self) -> bool {
        !matches!(self, PairError::Api(_))
    }
}

/// A lifecycle callback receiving the unpacked pair and the API client.
pub type PairCallback<C> = Box<
    dyn for<'a> Fn(&'a str, &'a str, &'a C) -> BoxFuture<'a, Result<(), ApiError>> + Send + Sync,
>;

/// Splits on the first delimiter. `None` when there is no delimiter at all.
pub fn split_id(id: &str) -> Option<(&str, &str)> {
    id.split_once(DELIMITER)
}

pub fn join_id(left: &str, right: &str) -> String {
    format!("{}{}{}", left, DELIMITER, right)
}

/// Names of the two fields a composite identifier decomposes into.
#[derive(Debug, Clone)]
pub struct PairId {
    left: String,
    right: String,
    schema: Schema,
}

impl PairId {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        let left = left.into();
        let right = right.into();
        let mut schema = Schema::new();
        schema.insert(left.clone(), FieldSchema::key_string());
        schema.insert(right.clone(), FieldSchema::key_string());
        Self {
            left,
            right,
            schema,
        }
    }

    /// Customizes the field schema before binding, e.g. to declare the right
    /// field as an integer.
    pub fn schema<F>(mut self, customize: F) -> Self
    where
        F: FnOnce(Schema) -> Schema,
    {
        self.schema = customize(self.schema);
        self
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    /// Splits an identifier into its two non-empty parts.
    pub fn decode<'a>(&self, id: &'a str) -> Result<(&'a str, &'a str), PairError> {
        let (left, right) = split_id(id).ok_or_else(|| PairError::InvalidId(id.to_string()))?;
        if right.is_empty() {
            return Err(PairError::EmptyField(self.right.clone()));
        }
        if left.is_empty() {
            return Err(PairError::EmptyField(self.left.clone()));
        }
        Ok((left, right))
    }

    /// Builds the identifier from the pending state's field values.
    pub fn encode(&self, d: &ResourceData) -> Result<String, PairError> {
        let left = d.get_string(&self.left);
        let right = d.get_string(&self.right);
        if right.is_empty() {
            return Err(PairError::EmptyField(self.right.clone()));
        }
        if left.is_empty() {
            return Err(PairError::EmptyField(self.left.clone()));
        }
        if left.contains(DELIMITER) {
            return Err(PairError::DelimiterInLeft {
                field: self.left.clone(),
                value: left,
            });
        }
        self.coerce_pair(&left, &right)?;
        Ok(join_id(&left, &right))
    }

    /// Decodes the stored identifier and writes both parts into `d` using
    /// their declared types. A malformed identifier is cleared.
    pub fn unpack(&self, d: &mut ResourceData) -> Result<(String, String), PairError> {
        let id = d.id().to_string();
        let (left, right) = match self.decode(&id) {
            Ok(parts) => parts,
            Err(err) => {
                d.clear_id();
                return Err(err);
            }
        };

        let (left_value, right_value) = self.coerce_pair(left, right)?;
        d.set(self.left.as_str(), left_value);
        d.set(self.right.as_str(), right_value);
        Ok((left.to_string(), right.to_string()))
    }

    fn coerce_pair(&self, left: &str, right: &str) -> Result<(Value, Value), PairError> {
        let left_value = self.field(&self.left).coerce(&self.left, left)?;
        let right_value = self.field(&self.right).coerce(&self.right, right)?;
        Ok((left_value, right_value))
    }

    fn field(&self, name: &str) -> FieldSchema {
        self.schema
            .get(name)
            .cloned()
            .unwrap_or_else(FieldSchema::key_string)
    }

    pub fn bind_resource<C>(self, callbacks: BindResource<C>) -> PairResource<C> {
        PairResource {
            pair: self,
            callbacks,
        }
    }
}

/// Per-resource callbacks. Any of them may be left out, in which case the
/// matching lifecycle step makes no remote call.
pub struct BindResource<C> {
    create: Option<PairCallback<C>>,
    read: Option<PairCallback<C>>,
    delete: Option<PairCallback<C>>,
}

impl<C> Default for BindResource<C> {
    fn default() -> Self {
        Self {
            create: None,
            read: None,
            delete: None,
        }
    }
}

impl<C> BindResource<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a str, &'a str, &'a C) -> BoxFuture<'a, Result<(), ApiError>>
            + Send
            + Sync
            + 'static,
    {
        self.create = Some(Box::new(f));
        self
    }

    pub fn read<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a str, &'a str, &'a C) -> BoxFuture<'a, Result<(), ApiError>>
            + Send
            + Sync
            + 'static,
    {
        self.read = Some(Box::new(f));
        self
    }

    pub fn delete<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a str, &'a str, &'a C) -> BoxFuture<'a, Result<(), ApiError>>
            + Send
            + Sync
            + 'static,
    {
        self.delete = Some(Box::new(f));
        self
    }
}

async fn invoke<C>(
    callback: Option<&PairCallback<C>>,
    left: &str,
    right: &str,
    client: &C,
) -> Result<(), ApiError> {
    match callback {
        Some(callback) => callback(left, right, client).await,
        None => Ok(()),
    }
}

/// Lifecycle entry points invoked by the host for one resource type.
#[async_trait]
pub trait Lifecycle<C: Sync>: Send + Sync {
    fn schema(&self) -> &Schema;

    async fn create(&self, d: &mut ResourceData, client: &C) -> Result<(), PairError>;

    async fn read(&self, d: &mut ResourceData, client: &C) -> Result<(), PairError>;

    async fn delete(&self, d: &mut ResourceData, client: &C) -> Result<(), PairError>;
}

pub struct PairResource<C> {
    pair: PairId,
    callbacks: BindResource<C>,
}

impl<C> PairResource<C> {
    pub fn pair(&self) -> &PairId {
        &self.pair
    }
}

#[async_trait]
impl<C: Sync> Lifecycle<C> for PairResource<C> {
    fn schema(&self) -> &Schema {
        &self.pair.schema
    }

    async fn create(&self, d: &mut ResourceData, client: &C) -> Result<(), PairError> {
        let id = self.pair.encode(d)?;
        let (left, right) = self.pair.decode(&id)?;

        tracing::debug!(%left, %right, "creating paired resource");

        if let Err(err) = invoke(self.callbacks.create.as_ref(), left, right, client).await {
            d.clear_id();
            return Err(err.into());
        }

        d.set_id(id);
        Ok(())
    }

    async fn read(&self, d: &mut ResourceData, client: &C) -> Result<(), PairError> {
        let (left, right) = self.pair.unpack(d)?;

        match invoke(self.callbacks.read.as_ref(), &left, &right, client).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => {
                tracing::info!(id = %d.id(), reason = %err, "resource is removed on backend");
                d.mark_removed();
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, d: &mut ResourceData, client: &C) -> Result<(), PairError> {
        let (left, right) = self.pair.unpack(d)?;

        tracing::debug!(id = %d.id(), "deleting paired resource");

        invoke(self.callbacks.delete.as_ref(), &left, &right, client).await?;
        Ok(())
    }
}
