// LocalLB.Monitor

use crate::client::IControlClient;
use crate::error::Error;
use crate::interfaces::names::MONITOR;
use crate::types::MonitorTemplate;

#[allow(async_fn_in_trait)]
pub trait MonitorApi {
    /// Every monitor template (built-in and user-defined).
    async fn monitor_get_template_list(&self) -> Result<Vec<MonitorTemplate>, Error>;
}

impl MonitorApi for IControlClient {
    async fn monitor_get_template_list(&self) -> Result<Vec<MonitorTemplate>, Error> {
        const METHOD: &str = "get_template_list";
        let ret = self.call(MONITOR, METHOD, &[]).await?;
        ret.items()
            .map(|item| MonitorTemplate::decode(METHOD, item))
            .collect()
    }
}
