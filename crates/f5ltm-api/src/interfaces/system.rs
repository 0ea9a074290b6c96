// System.SystemInfo

use crate::client::IControlClient;
use crate::error::Error;
use crate::interfaces::names::SYSTEM_INFO;

#[allow(async_fn_in_trait)]
pub trait SystemInfoApi {
    /// Software version string, e.g. `BIG-IP_v11.4.0`.
    async fn system_get_version(&self) -> Result<String, Error>;
}

impl SystemInfoApi for IControlClient {
    async fn system_get_version(&self) -> Result<String, Error> {
        let ret = self.call(SYSTEM_INFO, "get_version", &[]).await?;
        Ok(ret.text().trim().to_owned())
    }
}
