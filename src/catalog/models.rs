use crate::catalog::fill::validate_token;
use crate::foundation::error::{DesignerError, DesignerResult};

/// Ordered list of kayak models; each name is also its asset directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ModelCatalog {
    names: Vec<String>,
}

impl Default for ModelCatalog {
    /// A single model named `default`, used when the host supplies no list.
    fn default() -> Self {
        Self {
            names: vec!["default".to_string()],
        }
    }
}

impl ModelCatalog {
    pub fn new<I, S>(names: I) -> DesignerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let out = Self { names };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> DesignerResult<()> {
        if self.names.is_empty() {
            return Err(DesignerError::configuration(
                "model catalog must list at least one model",
            ));
        }
        for (i, name) in self.names.iter().enumerate() {
            validate_token("model name", name)?;
            if self.names[..i].contains(name) {
                return Err(DesignerError::configuration(format!(
                    "duplicate model '{name}' in catalog"
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// First entry; the fallback when a stale design names a retired model.
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
