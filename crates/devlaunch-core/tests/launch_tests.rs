//! Launch Configuration Tests
//!
//! End-to-end runs of RuntimeLoaderConfigurator against real archives,
//! descriptors and a mocked server bootstrap.

use devlaunch_artifact::{ArtifactSet, ClasspathEntry};
use devlaunch_classpath::ClasspathEntryResolver;
use devlaunch_core::{
    load_artifacts, BootstrapError, BootstrapPlan, ClassLoaderConfig, DescriptorInputs,
    LaunchConfig, LaunchError, LoaderPlan, LoaderSettings, RuntimeLoaderConfigurator,
    ServerBootstrap,
};
use devlaunch_descriptor::ContextOverrides;
use devlaunch_tempfs::TempResourceRegistry;
use devlaunch_test_utils::{count_entries, TestProject, WarLayout};
use mockall::mock;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

mock! {
    pub Bootstrap {}

    impl ServerBootstrap for Bootstrap {
        fn doc_base(&mut self, doc_base: &Path) -> Result<(), BootstrapError>;
        fn context_file<'a>(&mut self, descriptor: Option<&'a Path>) -> Result<(), BootstrapError>;
    }
}

struct Launch {
    project: TestProject,
    registry: TempResourceRegistry,
    temp_root: PathBuf,
}

impl Launch {
    fn new() -> Self {
        let project = TestProject::new();
        let temp_root = project.dir("tmp");
        Self {
            project,
            registry: TempResourceRegistry::new(),
            temp_root,
        }
    }

    fn configurator(&self) -> RuntimeLoaderConfigurator {
        RuntimeLoaderConfigurator::new(self.registry.clone())
            .with_resolver(ClasspathEntryResolver::new().with_temp_root(&self.temp_root))
            .with_descriptor_dir(&self.temp_root)
    }

    fn inputs(&self, context_file: Option<PathBuf>, overrides: ContextOverrides) -> DescriptorInputs {
        DescriptorInputs {
            context_file,
            overrides,
            doc_base: self.project.path().join("src/main/webapp"),
        }
    }
}

#[test]
fn test_full_launch_then_cleanup() {
    let launch = Launch::new();
    let project = &launch.project;
    let core = project.jar("core");
    let web = project.war("web", &WarLayout::new().class("App.class", b"x").lib("util.jar"));
    let classes = project.dir("target/classes");
    let context = project.file(
        "src/main/tomcatconf/context.xml",
        r#"<Context path="/app" reloadable="false"><Manager pathname=""/></Context>"#,
    );

    let request = LaunchConfig::default()
        .resolution_request(vec![core.clone(), web].into());
    let mut loader = LoaderPlan::new();
    let mut bootstrap = BootstrapPlan::new();
    let runtime = launch
        .configurator()
        .configure(
            ClassLoaderConfig::new(&mut loader, LoaderSettings::default()),
            &request,
            &[classes.clone()],
            &launch.inputs(Some(context.clone()), ContextOverrides::new(5, true)),
            &mut bootstrap,
        )
        .unwrap();

    assert_eq!(runtime.temp_directories().len(), 1);
    let expanded = runtime.temp_directories()[0].clone();
    assert_eq!(
        loader.repositories,
        vec![
            ClasspathEntry::from_path(core.path()),
            ClasspathEntry::from_path(expanded.join("WEB-INF/classes")),
            ClasspathEntry::from_path(expanded.join("WEB-INF/lib/util.jar")),
            ClasspathEntry::from_path(&classes),
        ]
    );
    assert_eq!(loader.delegate, Some(true));

    let descriptor = bootstrap.descriptor().unwrap().to_path_buf();
    assert_eq!(runtime.descriptor(), Some(descriptor.as_path()));
    assert_eq!(
        std::fs::read_to_string(&descriptor).unwrap(),
        r#"<Context path="/app" reloadable="true" backgroundProcessorDelay="5"><Manager pathname=""/></Context>"#
    );
    assert!(std::fs::read_to_string(&context).unwrap().contains(r#"reloadable="false""#));
    assert_eq!(bootstrap.doc_base, Some(project.path().join("src/main/webapp")));

    assert!(launch.registry.contains(&expanded));
    assert!(launch.registry.contains(&descriptor));
    let report = launch.registry.run_cleanup();
    assert!(report.is_clean());
    assert_eq!(report.attempted(), 2);
    assert_eq!(count_entries(&launch.temp_root), 0);

    drop(runtime);
    assert!(launch.registry.is_empty());
}

#[test]
fn test_bootstrap_receives_none_without_descriptor() {
    let launch = Launch::new();
    let mut bootstrap = MockBootstrap::new();
    let doc_base = launch.project.path().join("src/main/webapp");
    bootstrap
        .expect_doc_base()
        .withf(move |dir| dir == doc_base.as_path())
        .times(1)
        .returning(|_| Ok(()));
    bootstrap
        .expect_context_file()
        .withf(|descriptor| descriptor.is_none())
        .times(1)
        .returning(|_| Ok(()));

    let runtime = launch
        .configurator()
        .configure(
            ClassLoaderConfig::new(&mut LoaderPlan::new(), LoaderSettings::default()),
            &LaunchConfig::default().resolution_request(ArtifactSet::new()),
            &[],
            &launch.inputs(None, ContextOverrides::default()),
            &mut bootstrap,
        )
        .unwrap();

    assert_eq!(runtime.descriptor(), None);
    assert_eq!(count_entries(&launch.temp_root), 0);
    assert!(launch.registry.is_empty());
}

#[test]
fn test_bootstrap_rejection_releases_descriptor() {
    let launch = Launch::new();
    let mut bootstrap = MockBootstrap::new();
    bootstrap.expect_doc_base().returning(|_| Ok(()));
    bootstrap
        .expect_context_file()
        .withf(|descriptor| descriptor.is_some())
        .times(1)
        .returning(|_| Err(BootstrapError::new("context already deployed")));

    let err = launch
        .configurator()
        .configure(
            ClassLoaderConfig::new(&mut LoaderPlan::new(), LoaderSettings::default()),
            &LaunchConfig::default().resolution_request(ArtifactSet::new()),
            &[],
            &launch.inputs(None, ContextOverrides::new(-1, true)),
            &mut bootstrap,
        )
        .unwrap_err();

    assert!(matches!(err, LaunchError::Bootstrap(_)));
    assert_eq!(err.to_string(), "server bootstrap failed: context already deployed");
    assert_eq!(count_entries(&launch.temp_root), 0);
    assert!(launch.registry.is_empty());
}

#[test]
fn test_resolution_failure_stops_before_bootstrap() {
    let launch = Launch::new();
    let bad = launch.project.corrupt_war("broken");
    let mut bootstrap = MockBootstrap::new();
    bootstrap.expect_doc_base().never();
    bootstrap.expect_context_file().never();
    let mut loader = LoaderPlan::new();

    let err = launch
        .configurator()
        .configure(
            ClassLoaderConfig::new(&mut loader, LoaderSettings::default()),
            &LaunchConfig::default().resolution_request(vec![launch.project.jar("core"), bad].into()),
            &[],
            &launch.inputs(None, ContextOverrides::new(-1, true)),
            &mut bootstrap,
        )
        .unwrap_err();

    assert_eq!(err.stage(), "classpath resolution");
    assert!(err.to_string().contains("org.example:broken:1.0.0"));
    assert!(loader.repositories.is_empty());
    assert_eq!(count_entries(&launch.temp_root), 0);
}

#[test]
fn test_malformed_descriptor_keeps_extraction_dirs_registered() {
    let launch = Launch::new();
    let web = launch.project.war("web", &WarLayout::new().lib("util.jar"));
    let context = launch.project.file("context.xml", "<Context><Unclosed></Context>");
    let mut bootstrap = MockBootstrap::new();
    bootstrap.expect_doc_base().never();
    bootstrap.expect_context_file().never();

    let err = launch
        .configurator()
        .configure(
            ClassLoaderConfig::new(&mut LoaderPlan::new(), LoaderSettings::default()),
            &LaunchConfig::default().resolution_request(vec![web].into()),
            &[],
            &launch.inputs(Some(context), ContextOverrides::new(-1, false)),
            &mut bootstrap,
        )
        .unwrap_err();

    assert_eq!(err.stage(), "descriptor synthesis");
    assert_eq!(launch.registry.len(), 1);
    assert_eq!(count_entries(&launch.temp_root), 1);

    assert!(launch.registry.run_cleanup().is_clean());
    assert_eq!(count_entries(&launch.temp_root), 0);
}

#[test]
fn test_launch_from_config_files() {
    let launch = Launch::new();
    let project = &launch.project;
    project.jar("core");
    project.scoped_jar("junit", devlaunch_artifact::Scope::Test);
    project.dir("target/classes");
    project.file("conf/context.xml", r#"<Context crossContext="true"/>"#);
    let config_path = project.file(
        "devlaunch.toml",
        r#"
        context_file = "conf/context.xml"
        background_processor_delay = 3
        delegate = false
        additional_classpath_dirs = ["target/classes", "target/missing"]
        "#,
    );
    let manifest_path = project.file(
        "artifacts.json",
        r#"[
            {"group_id": "org.example", "artifact_id": "core", "version": "1.0.0", "path": "repo/core-1.0.0.jar"},
            {"group_id": "org.example", "artifact_id": "junit", "version": "1.0.0", "scope": "test",
             "path": "repo/junit-1.0.0.jar"}
        ]"#,
    );

    let config = LaunchConfig::load(&config_path).unwrap();
    let artifacts = load_artifacts(&manifest_path).unwrap();
    let mut loader = LoaderPlan::new();
    let mut bootstrap = BootstrapPlan::new();
    let runtime = launch
        .configurator()
        .configure(
            ClassLoaderConfig::new(&mut loader, config.loader_settings()),
            &config.resolution_request(artifacts),
            &config.additional_classpath_dirs,
            &config.descriptor_inputs(),
            &mut bootstrap,
        )
        .unwrap();

    assert_eq!(loader.delegate, Some(false));
    assert_eq!(
        runtime.entries(),
        &[
            ClasspathEntry::from_path(project.path().join("repo/core-1.0.0.jar")),
            ClasspathEntry::from_path(project.path().join("target/classes")),
        ]
    );
    let descriptor = std::fs::read_to_string(runtime.descriptor().unwrap()).unwrap();
    assert_eq!(
        descriptor,
        r#"<Context crossContext="true" backgroundProcessorDelay="3" reloadable="false"/>"#
    );
}
