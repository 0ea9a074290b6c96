// LocalLB.Rule

use crate::client::IControlClient;
use crate::error::Error;
use crate::interfaces::names::RULE;
use crate::types::RuleDefinition;

#[allow(async_fn_in_trait)]
pub trait RuleApi {
    /// Every iRule with its source text.
    async fn rule_query_all(&self) -> Result<Vec<RuleDefinition>, Error>;
}

impl RuleApi for IControlClient {
    async fn rule_query_all(&self) -> Result<Vec<RuleDefinition>, Error> {
        const METHOD: &str = "query_all_rules";
        let ret = self.call(RULE, METHOD, &[]).await?;
        ret.items()
            .map(|item| RuleDefinition::decode(METHOD, item))
            .collect()
    }
}
