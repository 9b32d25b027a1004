use minijinja::{default_auto_escape_callback, Environment, UndefinedBehavior, Value};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        // optional view data may be absent entirely
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Views are compiled into the binary.
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let content = match name {
        "layout.html" => Some(include_str!("views/layout.html")),
        "error.html" => Some(include_str!("views/error.html")),

        // Clusters
        "clusters/cluster/menu.html" => Some(include_str!("views/clusters/cluster/menu.html")),
        "clusters/cluster/index.html" => Some(include_str!("views/clusters/cluster/index.html")),
        "clusters/cluster/installNodes.html" => {
            Some(include_str!("views/clusters/cluster/installNodes.html"))
        }
        "clusters/cluster/installRemote.html" => {
            Some(include_str!("views/clusters/cluster/installRemote.html"))
        }
        "clusters/cluster/delete.html" => Some(include_str!("views/clusters/cluster/delete.html")),
        "clusters/cluster/createNode.html" => {
            Some(include_str!("views/clusters/cluster/createNode.html"))
        }
        "clusters/cluster/createBatch.html" => {
            Some(include_str!("views/clusters/cluster/createBatch.html"))
        }
        "clusters/cluster/updateNodeSSH.html" => {
            Some(include_str!("views/clusters/cluster/updateNodeSSH.html"))
        }
        "clusters/cluster/node.html" => Some(include_str!("views/clusters/cluster/node.html")),
        "clusters/cluster/node/update.html" => {
            Some(include_str!("views/clusters/cluster/node/update.html"))
        }
        "clusters/cluster/node/install.html" => {
            Some(include_str!("views/clusters/cluster/node/install.html"))
        }
        "clusters/cluster/node/logs.html" => {
            Some(include_str!("views/clusters/cluster/node/logs.html"))
        }

        // Server settings
        "servers/server/settings/gzip/form.html" => {
            Some(include_str!("views/servers/server/settings/gzip/form.html"))
        }
        "servers/server/settings/gzip/index.html" => {
            Some(include_str!("views/servers/server/settings/gzip/index.html"))
        }
        "servers/server/settings/websocket/form.html" => {
            Some(include_str!("views/servers/server/settings/websocket/form.html"))
        }
        "servers/server/settings/websocket/index.html" => {
            Some(include_str!("views/servers/server/settings/websocket/index.html"))
        }
        "servers/server/settings/locations/gzip/index.html" => Some(include_str!(
            "views/servers/server/settings/locations/gzip/index.html"
        )),
        "servers/server/settings/locations/websocket/index.html" => Some(include_str!(
            "views/servers/server/settings/locations/websocket/index.html"
        )),

        _ => None,
    };

    Ok(content.map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_error_page_escapes_message() {
        let engine = MiniJinjaEngine::new();
        let html = engine
            .render(
                "error.html",
                context! {
                    productName => "Edge Admin",
                    status => 500,
                    message => "<script>",
                },
            )
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Edge Admin"));
    }

    #[test]
    fn test_json_and_urlencode_filters() {
        let engine = MiniJinjaEngine::new();
        let html = engine
            .render(
                "servers/server/settings/gzip/form.html",
                context! {
                    formAction => "/servers/server/settings/gzip",
                    webId => 5,
                    gzipRef => context! { gzipId => 0, isOn => false },
                    gzipConfig => context! { id => 0, isOn => true, level => 0 },
                },
            )
            .unwrap();
        assert!(html.contains(r#"value='{"gzipId":0,"isOn":false}'"#));

        let html = engine
            .render(
                "clusters/cluster/index.html",
                context! {
                    clusterId => 1,
                    keyword => "edge one",
                    nodes => vec![context! { id => 7, name => "edge-7" }],
                    page => context! { total => 45, size => 20, current => 1, max => 3 },
                },
            )
            .unwrap();
        assert!(html.contains("keyword=edge%20one"));
    }

    #[test]
    fn test_unknown_template() {
        let engine = MiniJinjaEngine::new();
        assert!(engine.render("nope.html", Value::UNDEFINED).is_err());
    }
}
