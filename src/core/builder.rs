//! Rule tree builder.
//!
//! Maps bootstrap parameters to the tree of text replacements the template
//! needs. Construction is total and deterministic: every condition over the
//! parameters is evaluated here, and a false condition leaves a no-op
//! placeholder in its slot rather than dropping it, so equal parameters
//! always produce structurally equal trees.

use super::params::{Backend, BootstrapParams, DEFAULT_HOSTNAME};
use super::rules::{Rule, RuleNode};

/// Build the rule tree for one run.
///
/// The tree's shape mirrors the template's file layout, and every rule that
/// touches a given file lives in that file's single leaf.
pub fn build(params: &BootstrapParams) -> RuleNode {
    let nova = params.backend == Backend::Nova;
    let endpoint = params.endpoint();
    let insecure = params.scheme() != "https";

    RuleNode::dir(vec![
        (
            "package.json",
            RuleNode::file(vec![
                Rule::literal("@dashboards/app-name-placeholder", &params.app_name),
                Rule::when(
                    nova,
                    Rule::literal_all(
                        "@dashboards/sdk-backend-classic",
                        "@dashboards/sdk-backend-nova",
                    ),
                ),
                Rule::when(
                    nova,
                    Rule::literal_all(
                        r#""refresh-catalog": "node ./scripts/refresh-catalog.js""#,
                        r#""refresh-catalog": "node ./scripts/refresh-catalog.js --backend nova""#,
                    ),
                ),
                Rule::when(
                    insecure,
                    Rule::literal_all(
                        r#""start": "cross-env HTTPS=true react-scripts start","#,
                        r#""start": "react-scripts start","#,
                    ),
                ),
            ]),
        ),
        (
            "src",
            RuleNode::dir(vec![
                (
                    "constants.js",
                    RuleNode::file(vec![
                        Rule::regex(
                            r#"appName: "(.*?)""#,
                            &format!(r#"appName: "{}""#, params.app_name),
                        ),
                        Rule::literal_all(
                            &format!(r#"backend: "{DEFAULT_HOSTNAME}""#),
                            &format!(r#"backend: "{endpoint}""#),
                        ),
                        Rule::when(
                            nova,
                            Rule::literal_all(r#"workspace: """#, r#"workspace: "workspace""#),
                        ),
                    ]),
                ),
                (
                    "setupProxy.js",
                    RuleNode::file(vec![Rule::when(
                        nova,
                        Rule::literal_all(r#"proxy("/data""#, r#"proxy("/api""#),
                    )]),
                ),
                (
                    "components",
                    RuleNode::dir(vec![(
                        "Header",
                        RuleNode::dir(vec![(
                            "Header.js",
                            RuleNode::file(vec![
                                Rule::when(
                                    nova,
                                    Rule::literal_all("import Aside from \"./Aside\";\n", ""),
                                ),
                                Rule::when(nova, Rule::literal_all("<Aside />", "")),
                            ]),
                        )]),
                    )]),
                ),
            ]),
        ),
    ])
}
