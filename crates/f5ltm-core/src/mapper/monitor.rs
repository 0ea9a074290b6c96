// Health monitor reader (read-only)

use f5ltm_api::Device;
use tracing::warn;

use crate::error::CoreError;
use crate::model::Monitor;

pub struct MonitorReader<'a, D> {
    device: &'a D,
}

impl<'a, D: Device> MonitorReader<'a, D> {
    pub fn new(device: &'a D) -> Self {
        Self { device }
    }

    /// Every monitor template, in the order the appliance returns them.
    ///
    /// Templates of a type this build does not know are left out with a
    /// warning; `find` still reports them as an error.
    pub async fn find_all(&self) -> Result<Vec<Monitor>, CoreError> {
        let templates = self.device.monitor_get_template_list().await?;
        let mut monitors = Vec::with_capacity(templates.len());
        for template in templates {
            let name = template.template_name.clone();
            match Monitor::try_from(template) {
                Ok(monitor) => monitors.push(monitor),
                Err(CoreError::UnknownCode { kind, token }) => {
                    warn!(name = %name, kind, token = %token, "skipping monitor of unknown type");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(monitors)
    }

    pub async fn find(&self, name: &str) -> Result<Option<Monitor>, CoreError> {
        self.device
            .monitor_get_template_list()
            .await?
            .into_iter()
            .find(|t| t.template_name == name)
            .map(Monitor::try_from)
            .transpose()
    }
}
