//! End-to-end runs against the installed Subversion tools. Each test returns
//! early when `svnadmin`, `svn` or `svnlook` is not available.

mod common;

use common::Sandbox;
use repolist::{
    CommandRunner, Config, CreateRequest, RepositoryCatalog, RepositoryInspector, RepositoryProvisioner,
    SystemExecutor,
};

fn svn_tools_present(config: &Config) -> bool {
    let present = ["svnadmin", "svn", "svnlook"]
        .iter()
        .all(|tool| config.svn_binary(tool).is_file());
    if !present {
        eprintln!("skipping: Subversion tools not found in {}", config.svn_binary_dir.display());
    }
    present
}

#[test]
fn provisions_real_repository_and_lists_it() {
    let sandbox = Sandbox::new();
    if !svn_tools_present(&sandbox.config) {
        return;
    }

    let executor = SystemExecutor::new(sandbox.config.locale.clone());
    let runner = CommandRunner::with_config(&executor, &sandbox.config);
    let provisioner = RepositoryProvisioner::new(&sandbox.config, &runner);

    let request = CreateRequest::new("real-repo", "Created by the integration test", "tester").unwrap();
    let log = provisioner.create(&request).unwrap();
    assert!(log.contains("Committed revision 1."), "{log}");

    let inspector = RepositoryInspector::new(&sandbox.config, &runner);
    let repos = RepositoryCatalog::new(&inspector).list(&sandbox.config.root).unwrap();
    assert_eq!(repos.len(), 1);

    let repo = &repos[0];
    assert_eq!(repo.name(), "real-repo");
    assert_eq!(repo.revision(), Some("1"));
    assert_eq!(repo.readme(), Some("Created by the integration test"));
    assert_eq!(repo.trunk_path(), "real-repo/trunk/");
    assert!(repo.date().is_some());
    for dir in ["/trunk/", "/tags/", "/branches/"] {
        assert!(repo.exists_at_subpath(dir), "{dir} missing");
    }
    assert!(sandbox.scratch_leftovers().is_empty());
    assert!(sandbox.authz().ends_with("\n[real-repo:/]\ntester = rw\n"));
}

#[test]
fn plain_directory_is_not_listed() {
    let sandbox = Sandbox::new();
    if !svn_tools_present(&sandbox.config) {
        return;
    }

    let executor = SystemExecutor::new("C");
    let runner = CommandRunner::with_config(&executor, &sandbox.config);
    let inspector = RepositoryInspector::new(&sandbox.config, &runner);

    // 不是仓库的普通目录
    std::fs::create_dir(sandbox.config.root.join("plain")).unwrap();
    let repos = RepositoryCatalog::new(&inspector).list(&sandbox.config.root).unwrap();
    assert!(repos.is_empty());
    assert!(inspector.date(&sandbox.config.root.join("plain")).is_none());
}
