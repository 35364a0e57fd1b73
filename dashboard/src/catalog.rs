//! Static catalog of the predefined dashboard commands.
//!
//! A plain enumerated table mapping command identifiers to display strings;
//! the UI renders these as one-click buttons next to the terminal.

use shared_types::CommandSpec;

const CATALOG: &[(&str, &str, &str)] = &[
    (
        "demo-faq",
        "FAQ Search Demo",
        "Scaffold an FAQ search demo for a prospect",
    ),
    (
        "demo-dashboard",
        "Dashboard Demo",
        "Scaffold an analytics dashboard demo",
    ),
    (
        "demo-quick",
        "Custom Quick Demo",
        "Build a custom demo from typed requirements",
    ),
    (
        "prototype",
        "Prototype",
        "Spin up a throwaway prototype project",
    ),
    (
        "deploy-vercel",
        "Deploy to Vercel",
        "Deploy the current workspace project to Vercel",
    ),
    (
        "tech-proposal",
        "Technical Proposal",
        "Generate a technical proposal document",
    ),
    (
        "tech-estimate",
        "Effort Estimate",
        "Generate a work-effort estimate",
    ),
    (
        "helpfeel-integrate",
        "Helpfeel Integration",
        "Create a Helpfeel integration sample",
    ),
];

pub fn command_catalog() -> Vec<CommandSpec> {
    CATALOG
        .iter()
        .map(|(id, name, description)| CommandSpec {
            id: (*id).to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

/// Description for one command id, if it is in the catalog.
pub fn describe(id: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(candidate, _, _)| *candidate == id)
        .map(|(_, _, description)| *description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_the_known_command_ids() {
        let ids: Vec<_> = command_catalog().into_iter().map(|c| c.id).collect();
        for expected in [
            "demo-faq",
            "demo-dashboard",
            "demo-quick",
            "prototype",
            "deploy-vercel",
            "tech-proposal",
            "tech-estimate",
            "helpfeel-integrate",
        ] {
            assert!(ids.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn describe_returns_none_for_unknown_ids() {
        assert!(describe("demo-faq").is_some());
        assert!(describe("not-a-command").is_none());
    }
}
