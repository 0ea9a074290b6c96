// iRule reader (read-only)

use f5ltm_api::Device;

use crate::error::CoreError;
use crate::model::Rule;

pub struct RuleReader<'a, D> {
    device: &'a D,
}

impl<'a, D: Device> RuleReader<'a, D> {
    pub fn new(device: &'a D) -> Self {
        Self { device }
    }

    /// Every iRule, sorted by name, with trimmed code.
    pub async fn find_all(&self) -> Result<Vec<Rule>, CoreError> {
        let mut rules: Vec<Rule> = self
            .device
            .rule_query_all()
            .await?
            .into_iter()
            .map(Rule::from)
            .collect();
        rules.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rules)
    }

    pub async fn find(&self, name: &str) -> Result<Option<Rule>, CoreError> {
        Ok(self
            .device
            .rule_query_all()
            .await?
            .into_iter()
            .find(|r| r.rule_name == name)
            .map(Rule::from))
    }
}
