//! Entity facades: every call is scoped to the open transaction.

use crate::client::capabilities::{BackendAdmin, DefaultsAdmin, FrontendAdmin};
use crate::client::Client;
use crate::error::ClientResult;
use crate::models::{
    Backend, BackendSwitchingRule, Bind, Frontend, HttpRequestRule, HttpResponseRule, LogTarget,
    RuleParent, Server, TcpRequestRule,
};
use crate::runtime::RuntimeChannel;
use crate::store::{ConfigurationStore, StoreError};

fn indices<T>(rules: Vec<T>) -> Vec<usize> {
    // Highest first, so earlier deletions do not shift later ones.
    (0..rules.len()).rev().collect()
}

impl<S: ConfigurationStore, R: RuntimeChannel> BackendAdmin for Client<S, R> {
    fn backends_get(&self) -> ClientResult<Vec<Backend>> {
        self.read("backends_get", |store, txn| store.backends(txn))
    }

    fn backend_get(&self, name: &str) -> ClientResult<Backend> {
        self.read("backend_get", |store, txn| store.backend(txn, name))
    }

    fn backend_create(&mut self, backend: &Backend) -> ClientResult<()> {
        self.mutate("backend_create", |store, txn| store.create_backend(txn, backend))
    }

    fn backend_edit(&mut self, backend: &Backend) -> ClientResult<()> {
        self.mutate("backend_edit", |store, txn| store.edit_backend(txn, backend))
    }

    fn backend_delete(&mut self, name: &str) -> ClientResult<()> {
        self.mutate("backend_delete", |store, txn| store.delete_backend(txn, name))
    }

    fn backend_servers_get(&self, backend: &str) -> ClientResult<Vec<Server>> {
        self.read("backend_servers_get", |store, txn| store.servers(txn, backend))
    }

    fn backend_server_get(&self, backend: &str, server: &str) -> ClientResult<Server> {
        self.read("backend_server_get", |store, txn| store.server(txn, backend, server))
    }

    fn backend_server_create(&mut self, backend: &str, server: &Server) -> ClientResult<()> {
        self.mutate("backend_server_create", |store, txn| {
            store.create_server(txn, backend, server)
        })
    }

    fn backend_server_edit(&mut self, backend: &str, server: &Server) -> ClientResult<()> {
        self.mutate("backend_server_edit", |store, txn| {
            store.edit_server(txn, backend, server)
        })
    }

    fn backend_server_delete(&mut self, backend: &str, server: &str) -> ClientResult<()> {
        self.mutate("backend_server_delete", |store, txn| {
            store.delete_server(txn, backend, server)
        })
    }

    fn backend_server_delete_all(&mut self, backend: &str) -> ClientResult<bool> {
        self.delete_all(
            "backend_server_delete_all",
            |store, txn| {
                let servers = store.servers(txn, backend)?;
                Ok(servers.into_iter().map(|s| s.name).collect())
            },
            |store, txn, name: &String| store.delete_server(txn, backend, name),
        )
    }

    fn backend_http_request_rules_get(&self, backend: &str) -> ClientResult<Vec<HttpRequestRule>> {
        let parent = RuleParent::Backend(backend.to_string());
        self.read("backend_http_request_rules_get", |store, txn| {
            store.http_request_rules(txn, &parent)
        })
    }

    fn backend_http_request_rule_get(
        &self,
        backend: &str,
        index: usize,
    ) -> ClientResult<HttpRequestRule> {
        let parent = RuleParent::Backend(backend.to_string());
        self.read("backend_http_request_rule_get", |store, txn| {
            store.http_request_rule(txn, &parent, index)
        })
    }

    fn backend_http_request_rule_create(
        &mut self,
        backend: &str,
        rule: &HttpRequestRule,
    ) -> ClientResult<()> {
        let parent = RuleParent::Backend(backend.to_string());
        self.mutate("backend_http_request_rule_create", |store, txn| {
            store.create_http_request_rule(txn, &parent, rule)
        })
    }

    fn backend_http_request_rule_edit(
        &mut self,
        backend: &str,
        index: usize,
        rule: &HttpRequestRule,
    ) -> ClientResult<()> {
        let parent = RuleParent::Backend(backend.to_string());
        self.mutate("backend_http_request_rule_edit", |store, txn| {
            store.edit_http_request_rule(txn, &parent, index, rule)
        })
    }

    fn backend_http_request_rule_delete(
        &mut self,
        backend: &str,
        index: usize,
    ) -> ClientResult<()> {
        let parent = RuleParent::Backend(backend.to_string());
        self.mutate("backend_http_request_rule_delete", |store, txn| {
            store.delete_http_request_rule(txn, &parent, index)
        })
    }

    fn backend_http_request_rule_delete_all(&mut self, backend: &str) -> ClientResult<bool> {
        let parent = RuleParent::Backend(backend.to_string());
        self.delete_all(
            "backend_http_request_rule_delete_all",
            |store, txn| store.http_request_rules(txn, &parent).map(indices),
            |store, txn, index| store.delete_http_request_rule(txn, &parent, *index),
        )
    }
}

impl<S: ConfigurationStore, R: RuntimeChannel> FrontendAdmin for Client<S, R> {
    fn frontends_get(&self) -> ClientResult<Vec<Frontend>> {
        self.read("frontends_get", |store, txn| store.frontends(txn))
    }

    fn frontend_get(&self, name: &str) -> ClientResult<Frontend> {
        self.read("frontend_get", |store, txn| store.frontend(txn, name))
    }

    fn frontend_create(&mut self, frontend: &Frontend) -> ClientResult<()> {
        self.mutate("frontend_create", |store, txn| store.create_frontend(txn, frontend))
    }

    fn frontend_edit(&mut self, frontend: &Frontend) -> ClientResult<()> {
        self.mutate("frontend_edit", |store, txn| store.edit_frontend(txn, frontend))
    }

    fn frontend_delete(&mut self, name: &str) -> ClientResult<()> {
        self.mutate("frontend_delete", |store, txn| store.delete_frontend(txn, name))
    }

    fn frontend_binds_get(&self, frontend: &str) -> ClientResult<Vec<Bind>> {
        self.read("frontend_binds_get", |store, txn| store.binds(txn, frontend))
    }

    fn frontend_bind_get(&self, frontend: &str, bind: &str) -> ClientResult<Bind> {
        self.read("frontend_bind_get", |store, txn| store.bind(txn, frontend, bind))
    }

    fn frontend_bind_create(&mut self, frontend: &str, bind: &Bind) -> ClientResult<()> {
        self.mutate("frontend_bind_create", |store, txn| {
            store.create_bind(txn, frontend, bind)
        })
    }

    fn frontend_bind_edit(&mut self, frontend: &str, bind: &Bind) -> ClientResult<()> {
        self.mutate("frontend_bind_edit", |store, txn| store.edit_bind(txn, frontend, bind))
    }

    fn frontend_bind_delete(&mut self, frontend: &str, bind: &str) -> ClientResult<()> {
        self.mutate("frontend_bind_delete", |store, txn| {
            store.delete_bind(txn, frontend, bind)
        })
    }

    fn backend_switching_rules_get(
        &self,
        frontend: &str,
    ) -> ClientResult<Vec<BackendSwitchingRule>> {
        self.read("backend_switching_rules_get", |store, txn| {
            store.switching_rules(txn, frontend)
        })
    }

    fn backend_switching_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<BackendSwitchingRule> {
        self.read("backend_switching_rule_get", |store, txn| {
            store.switching_rule(txn, frontend, index)
        })
    }

    fn backend_switching_rule_create(
        &mut self,
        frontend: &str,
        rule: &BackendSwitchingRule,
    ) -> ClientResult<()> {
        self.mutate("backend_switching_rule_create", |store, txn| {
            store.create_switching_rule(txn, frontend, rule)
        })
    }

    fn backend_switching_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &BackendSwitchingRule,
    ) -> ClientResult<()> {
        self.mutate("backend_switching_rule_edit", |store, txn| {
            store.edit_switching_rule(txn, frontend, index, rule)
        })
    }

    fn backend_switching_rule_delete(&mut self, frontend: &str, index: usize) -> ClientResult<()> {
        self.mutate("backend_switching_rule_delete", |store, txn| {
            store.delete_switching_rule(txn, frontend, index)
        })
    }

    fn backend_switching_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool> {
        self.delete_all(
            "backend_switching_rule_delete_all",
            |store, txn| store.switching_rules(txn, frontend).map(indices),
            |store, txn, index| store.delete_switching_rule(txn, frontend, *index),
        )
    }

    fn frontend_http_request_rules_get(
        &self,
        frontend: &str,
    ) -> ClientResult<Vec<HttpRequestRule>> {
        let parent = RuleParent::Frontend(frontend.to_string());
        self.read("frontend_http_request_rules_get", |store, txn| {
            store.http_request_rules(txn, &parent)
        })
    }

    fn frontend_http_request_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<HttpRequestRule> {
        let parent = RuleParent::Frontend(frontend.to_string());
        self.read("frontend_http_request_rule_get", |store, txn| {
            store.http_request_rule(txn, &parent, index)
        })
    }

    fn frontend_http_request_rule_create(
        &mut self,
        frontend: &str,
        rule: &HttpRequestRule,
    ) -> ClientResult<()> {
        let parent = RuleParent::Frontend(frontend.to_string());
        self.mutate("frontend_http_request_rule_create", |store, txn| {
            store.create_http_request_rule(txn, &parent, rule)
        })
    }

    fn frontend_http_request_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &HttpRequestRule,
    ) -> ClientResult<()> {
        let parent = RuleParent::Frontend(frontend.to_string());
        self.mutate("frontend_http_request_rule_edit", |store, txn| {
            store.edit_http_request_rule(txn, &parent, index, rule)
        })
    }

    fn frontend_http_request_rule_delete(
        &mut self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<()> {
        let parent = RuleParent::Frontend(frontend.to_string());
        self.mutate("frontend_http_request_rule_delete", |store, txn| {
            store.delete_http_request_rule(txn, &parent, index)
        })
    }

    fn frontend_http_request_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool> {
        let parent = RuleParent::Frontend(frontend.to_string());
        self.delete_all(
            "frontend_http_request_rule_delete_all",
            |store, txn| store.http_request_rules(txn, &parent).map(indices),
            |store, txn, index| store.delete_http_request_rule(txn, &parent, *index),
        )
    }

    fn frontend_http_response_rules_get(
        &self,
        frontend: &str,
    ) -> ClientResult<Vec<HttpResponseRule>> {
        self.read("frontend_http_response_rules_get", |store, txn| {
            store.http_response_rules(txn, frontend)
        })
    }

    fn frontend_http_response_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<HttpResponseRule> {
        self.read("frontend_http_response_rule_get", |store, txn| {
            store.http_response_rule(txn, frontend, index)
        })
    }

    fn frontend_http_response_rule_create(
        &mut self,
        frontend: &str,
        rule: &HttpResponseRule,
    ) -> ClientResult<()> {
        self.mutate("frontend_http_response_rule_create", |store, txn| {
            store.create_http_response_rule(txn, frontend, rule)
        })
    }

    fn frontend_http_response_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &HttpResponseRule,
    ) -> ClientResult<()> {
        self.mutate("frontend_http_response_rule_edit", |store, txn| {
            store.edit_http_response_rule(txn, frontend, index, rule)
        })
    }

    fn frontend_http_response_rule_delete(
        &mut self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<()> {
        self.mutate("frontend_http_response_rule_delete", |store, txn| {
            store.delete_http_response_rule(txn, frontend, index)
        })
    }

    fn frontend_http_response_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool> {
        self.delete_all(
            "frontend_http_response_rule_delete_all",
            |store, txn| store.http_response_rules(txn, frontend).map(indices),
            |store, txn, index| store.delete_http_response_rule(txn, frontend, *index),
        )
    }

    fn frontend_tcp_request_rules_get(&self, frontend: &str) -> ClientResult<Vec<TcpRequestRule>> {
        self.read("frontend_tcp_request_rules_get", |store, txn| {
            store.tcp_request_rules(txn, frontend)
        })
    }

    fn frontend_tcp_request_rule_get(
        &self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<TcpRequestRule> {
        self.read("frontend_tcp_request_rule_get", |store, txn| {
            store.tcp_request_rule(txn, frontend, index)
        })
    }

    fn frontend_tcp_request_rule_create(
        &mut self,
        frontend: &str,
        rule: &TcpRequestRule,
    ) -> ClientResult<()> {
        self.mutate("frontend_tcp_request_rule_create", |store, txn| {
            store.create_tcp_request_rule(txn, frontend, rule)
        })
    }

    fn frontend_tcp_request_rule_edit(
        &mut self,
        frontend: &str,
        index: usize,
        rule: &TcpRequestRule,
    ) -> ClientResult<()> {
        self.mutate("frontend_tcp_request_rule_edit", |store, txn| {
            store.edit_tcp_request_rule(txn, frontend, index, rule)
        })
    }

    fn frontend_tcp_request_rule_delete(
        &mut self,
        frontend: &str,
        index: usize,
    ) -> ClientResult<()> {
        self.mutate("frontend_tcp_request_rule_delete", |store, txn| {
            store.delete_tcp_request_rule(txn, frontend, index)
        })
    }

    fn frontend_tcp_request_rule_delete_all(&mut self, frontend: &str) -> ClientResult<bool> {
        self.delete_all(
            "frontend_tcp_request_rule_delete_all",
            |store, txn| store.tcp_request_rules(txn, frontend).map(indices),
            |store, txn, index| store.delete_tcp_request_rule(txn, frontend, *index),
        )
    }
}

impl<S: ConfigurationStore, R: RuntimeChannel> DefaultsAdmin for Client<S, R> {
    fn set_daemon_mode(&mut self, enabled: Option<bool>) -> ClientResult<()> {
        self.mutate("set_daemon_mode", |store, txn| {
            let mut global = store.global(txn)?;
            global.daemon = enabled;
            store.replace_global(txn, &global)
        })
    }

    fn set_default_log_format(&mut self, value: Option<&str>) -> ClientResult<()> {
        self.mutate("set_default_log_format", |store, txn| {
            let mut defaults = store.defaults(txn)?;
            defaults.log_format = value.map(String::from);
            store.replace_defaults(txn, &defaults)
        })
    }

    fn set_default_maxconn(&mut self, value: Option<i64>) -> ClientResult<()> {
        self.mutate("set_default_maxconn", |store, txn| {
            let mut defaults = store.defaults(txn)?;
            defaults.maxconn = value;
            store.replace_defaults(txn, &defaults)
        })
    }

    fn set_default_option(&mut self, option: &str, enabled: Option<bool>) -> ClientResult<()> {
        self.mutate("set_default_option", |store, txn| {
            let mut defaults = store.defaults(txn)?;
            match enabled {
                Some(enabled) => {
                    defaults.options.insert(option.to_string(), enabled);
                }
                None => {
                    defaults.options.remove(option);
                }
            }
            store.replace_defaults(txn, &defaults)
        })
    }

    fn set_default_timeout(&mut self, timeout: &str, value: Option<&str>) -> ClientResult<()> {
        self.mutate("set_default_timeout", |store, txn| {
            let mut defaults = store.defaults(txn)?;
            match value {
                Some(value) => {
                    defaults.timeouts.insert(timeout.to_string(), value.to_string());
                }
                None => {
                    defaults.timeouts.remove(timeout);
                }
            }
            store.replace_defaults(txn, &defaults)
        })
    }

    fn set_log_target(&mut self, target: Option<&LogTarget>, index: usize) -> ClientResult<()> {
        self.mutate("set_log_target", |store, txn| {
            let mut global = store.global(txn)?;
            let len = global.log_targets.len();
            match target {
                Some(target) if index < len => global.log_targets[index] = target.clone(),
                Some(target) if index == len => global.log_targets.push(target.clone()),
                None if index < len => {
                    global.log_targets.remove(index);
                }
                _ => {
                    return Err(StoreError::IndexOutOfRange {
                        kind: "log target",
                        index,
                        len,
                    })
                }
            }
            store.replace_global(txn, &global)
        })
    }

    fn set_hard_stop_after(&mut self, value: Option<&str>) -> ClientResult<()> {
        self.mutate("set_hard_stop_after", |store, txn| {
            let mut global = store.global(txn)?;
            global.hard_stop_after = value.map(String::from);
            store.replace_global(txn, &global)
        })
    }

    fn set_nbthread(&mut self, value: Option<i64>) -> ClientResult<()> {
        self.mutate("set_nbthread", |store, txn| {
            let mut global = store.global(txn)?;
            global.nbthread = value;
            store.replace_global(txn, &global)
        })
    }
}
