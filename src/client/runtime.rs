//! Runtime facade: forwards straight to the runtime channel.

use crate::client::capabilities::RuntimeControl;
use crate::client::Client;
use crate::error::ClientResult;
use crate::runtime::RuntimeChannel;
use crate::store::ConfigurationStore;

impl<S: ConfigurationStore, R: RuntimeChannel> RuntimeControl for Client<S, R> {
    fn set_server_state(&self, backend: &str, server: &str, state: &str) -> ClientResult<()> {
        tracing::info!(backend, server, state, "Setting server state");
        Ok(self.runtime.set_server_state(backend, server, state)?)
    }

    fn set_server_addr(
        &self,
        backend: &str,
        server: &str,
        ip: &str,
        port: u16,
    ) -> ClientResult<()> {
        tracing::info!(backend, server, ip, port, "Setting server address");
        Ok(self.runtime.set_server_addr(backend, server, ip, port)?)
    }

    fn execute_raw(&self, command: &str) -> ClientResult<Vec<String>> {
        Ok(self.runtime.execute_raw(command)?)
    }

    fn is_feature_enabled(&self, name: &str) -> ClientResult<bool> {
        Ok(self.runtime.is_feature_enabled(name)?)
    }
}
