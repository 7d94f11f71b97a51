//! Theme: host-supplied colors exposed to the views as CSS custom properties

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CSS_VAR_PREFIX: &str = "--swk-";

/// `{ "backgroundSecondary": "#222" }` becomes `--swk-background-secondary: #222`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    pub vars: BTreeMap<String, String>,
}

impl Theme {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn css_variables(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (css_var_name(k), v.clone()))
            .collect()
    }
}

pub fn css_var_name(key: &str) -> String {
    let mut name = String::from(CSS_VAR_PREFIX);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else if c == '_' {
            name.push('-');
        } else {
            name.push(c);
        }
    }
    name
}
