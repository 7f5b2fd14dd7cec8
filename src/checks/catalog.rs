//! Built-in checks.
//!
//! Covers the tools a scientific-Python workshop expects: shells, editors,
//! browsers, version control, build tools and the Python package stack.

use std::path::PathBuf;

use crate::system::VersionSource;

use super::probe::{
    CommandFallback, CommandProbe, ImportCandidate, LibraryProbe, Probe, TaskProbe, VersionStream,
};
use super::registry::{DependencySpec, RegistryBuilder};

/// Checks run when none are requested.
pub const DEFAULT_CHECKS: &[&str] = &[
    "virtual-shell",
    "virtual-editor",
    "virtual-browser",
    "git",
    "hg",
    "EasyMercurial",
    "make",
    "virtual-pypi-installer",
    "setuptools",
    "nosetests",
    "nose",
    "sqlite3",
    "sqlite3-python",
    "python",
    "ipython",
    "IPython",
    "argparse",
    "numpy",
    "scipy",
    "matplotlib",
    "pandas",
    "sympy",
    "Cython",
    "networkx",
    "mayavi.mlab",
];

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = "python";

/// File the operator is asked to create for the editor task.
pub const EDITOR_TASK_FILE: &str = "swc-installation-test.txt";

/// Contents expected in [`EDITOR_TASK_FILE`].
pub const EDITOR_TASK_CONTENTS: &str = "Hello, world!";

// (command, long name, minimum)
const COMMANDS: &[(&str, Option<&str>, Option<&[u64]>)] = &[
    ("sh", Some("Bourne Shell"), None),
    ("ash", Some("Almquist Shell"), None),
    ("bash", Some("Bourne Again Shell"), None),
    ("csh", Some("C Shell"), None),
    ("ksh", Some("KornShell"), None),
    ("dash", Some("Debian Almquist Shell"), None),
    ("tcsh", Some("TENEX C Shell"), None),
    ("zsh", Some("Z Shell"), None),
    ("git", Some("Git"), Some(&[1, 7, 0])),
    ("hg", Some("Mercurial"), Some(&[2, 0, 0])),
    ("EasyMercurial", None, Some(&[1, 3])),
    ("pip", None, None),
    ("sqlite3", Some("SQLite 3"), None),
    ("nosetests", Some("Nose"), Some(&[1, 0, 0])),
    ("ipython", Some("IPython script"), Some(&[0, 13])),
    ("emacs", Some("Emacs"), None),
    ("xemacs", Some("XEmacs"), None),
    ("vim", Some("Vim"), None),
    ("vi", None, None),
    ("nano", Some("Nano"), None),
    ("gedit", None, None),
    ("kate", Some("Kate"), None),
    ("notepad++", Some("Notepad++"), None),
    ("firefox", Some("Firefox"), None),
    ("google-chrome", Some("Google Chrome"), None),
    ("chromium", Some("Chromium"), None),
];

// (name, long name, candidate paths)
const PATHS: &[(&str, &str, &[&str])] = &[
    ("sublime-text", "Sublime Text", &["/Applications/Sublime Text 2.app"]),
    ("textmate", "TextMate", &["/Applications/TextMate.app"]),
    ("textwrangler", "TextWrangler", &["/Applications/TextWrangler.app"]),
    (
        "xcode",
        "Xcode",
        &["/Applications/Xcode.app", "/Developer/Applications/Xcode.app"],
    ),
];

// (module, name, long name, minimum, extra prerequisites)
const PACKAGES: &[(&str, &str, Option<&str>, Option<&[u64]>, &[&str])] = &[
    ("nose", "nose", Some("Nose Python package"), Some(&[1, 0, 0]), &[]),
    ("jinja2", "jinja", Some("Jinja"), Some(&[2, 6]), &[]),
    ("zmq", "pyzmq", Some("PyZMQ"), Some(&[2, 1, 4]), &[]),
    (
        "IPython",
        "IPython",
        Some("IPython Python package"),
        Some(&[0, 13]),
        &["jinja", "tornado", "pyzmq"],
    ),
    ("argparse", "argparse", Some("Argparse"), None, &[]),
    ("numpy", "numpy", Some("NumPy"), None, &[]),
    ("scipy", "scipy", Some("SciPy"), None, &[]),
    ("matplotlib", "matplotlib", Some("Matplotlib"), None, &[]),
    ("pandas", "pandas", Some("Pandas"), Some(&[0, 8]), &[]),
    ("sympy", "sympy", Some("SymPy"), None, &[]),
    ("Cython", "Cython", None, None, &[]),
    ("networkx", "networkx", Some("NetworkX"), None, &[]),
    ("mayavi.mlab", "mayavi.mlab", Some("MayaVi"), None, &[]),
    ("setuptools", "setuptools", Some("Setuptools"), None, &[]),
];

// (name, long name, alternatives in preference order)
const VIRTUALS: &[(&str, &str, &[&str])] = &[
    (
        "virtual-shell",
        "command line shell",
        &["bash", "dash", "ash", "zsh", "ksh", "csh", "tcsh", "sh"],
    ),
    (
        "virtual-editor",
        "text/code editor",
        &[
            "emacs",
            "xemacs",
            "vim",
            "vi",
            "nano",
            "gedit",
            "kate",
            "notepad++",
            "sublime-text",
            "textmate",
            "textwrangler",
            // last: needs the operator
            "other-editor",
        ],
    ),
    ("virtual-browser", "web browser", &["firefox", "google-chrome", "chromium"]),
    ("virtual-pypi-installer", "PyPI installer", &["easy_install", "pip"]),
];

fn with_long_name(spec: DependencySpec, long_name: Option<&str>) -> DependencySpec {
    match long_name {
        Some(long) => spec.long_name(long),
        None => spec,
    }
}

fn with_minimum(spec: DependencySpec, minimum: Option<&[u64]>) -> DependencySpec {
    match minimum {
        Some(components) => spec.minimum(components),
        None => spec,
    }
}

/// Path of the file the editor task asks for.
pub fn editor_task_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(EDITOR_TASK_FILE)
}

/// Builder pre-loaded with every built-in check.
///
/// `python` is the interpreter used by the `python` check and by every
/// package import.
pub fn builtin(python: &str) -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();

    builder.add(
        DependencySpec::new(
            "python",
            Probe::Command(CommandProbe::new(python).with_stream(VersionStream::Combined)),
        )
        .long_name("Python version")
        .minimum(&[2, 6]),
    );

    for (command, long_name, minimum) in COMMANDS {
        let spec = with_long_name(DependencySpec::command(command), *long_name);
        builder.add(with_minimum(spec, *minimum));
    }

    builder.add(DependencySpec::new(
        "make",
        Probe::Command(CommandProbe::new("make").with_fallback(CommandFallback::MakefileQuery)),
    ));

    builder.add(
        DependencySpec::new(
            "easy_install",
            Probe::Command(CommandProbe::new("easy_install").with_fallback(
                CommandFallback::UnrecognizedFlag {
                    marker: "option --version not recognized".to_string(),
                    version: "unknown (possibly Setuptools?)".to_string(),
                },
            )),
        )
        .long_name("Setuptools easy_install"),
    );

    for (name, long_name, paths) in PATHS {
        builder.add(DependencySpec::paths(name, paths).long_name(long_name));
    }

    for (module, name, long_name, minimum, requires) in PACKAGES {
        let spec = DependencySpec::library(name, module)
            .requires(&["python"])
            .requires(requires);
        let spec = with_long_name(spec, *long_name);
        builder.add(with_minimum(spec, *minimum));
    }

    builder.add(
        DependencySpec::new(
            "mercurial",
            Probe::Library(
                LibraryProbe::with_source("mercurial.util", VersionSource::Call("version".into()))
                    .or_else(
                        ImportCandidate::new("mercurial.version")
                            .with_source(VersionSource::Call("get_version".into())),
                    ),
            ),
        )
        .long_name("Mercurial Python package")
        .minimum(&[2, 0, 0])
        .requires(&["python"]),
    );

    builder.add(
        DependencySpec::new(
            "tornado",
            Probe::Library(LibraryProbe::with_source(
                "tornado",
                VersionSource::Attribute("version".into()),
            )),
        )
        .long_name("Tornado")
        .minimum(&[2, 0])
        .requires(&["python"]),
    );

    builder.add(
        DependencySpec::new(
            "sqlite3-python",
            Probe::Library(LibraryProbe::with_source("sqlite3", VersionSource::Interpreter)),
        )
        .long_name("SQLite Python package")
        .requires(&["python"]),
    );

    builder.add(
        DependencySpec::task(
            "other-editor",
            TaskProbe::create_file(editor_task_path(), EDITOR_TASK_CONTENTS),
        )
        .long_name(""),
    );

    for (name, long_name, alternatives) in VIRTUALS {
        builder.add(DependencySpec::alternatives(name, alternatives).long_name(long_name));
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::dependency::Dependency;
    use crate::checks::registry::Registry;

    fn registry() -> Registry {
        builtin(DEFAULT_PYTHON).build().unwrap()
    }

    #[test]
    fn builtin_catalog_builds() {
        let registry = registry();
        assert!(registry.len() > DEFAULT_CHECKS.len());
    }

    #[test]
    fn default_checks_are_registered() {
        let registry = registry();
        for name in DEFAULT_CHECKS {
            assert!(registry.lookup(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn packages_require_python() {
        let registry = registry();
        let python = registry.lookup("python").unwrap();
        for name in ["numpy", "mercurial", "tornado", "sqlite3-python", "IPython"] {
            let dep = registry.dependency(name).unwrap();
            assert!(dep.and_dependencies().contains(&python), "{}", name);
        }
    }

    #[test]
    fn ipython_package_prerequisites() {
        let registry = registry();
        let ipython = registry.dependency("IPython").unwrap();
        let names: Vec<&str> = ipython
            .and_dependencies()
            .iter()
            .map(|id| registry.get(*id).name())
            .collect();
        assert_eq!(names, vec!["python", "jinja", "tornado", "pyzmq"]);
    }

    #[test]
    fn virtual_editor_tries_operator_task_last() {
        let registry = registry();
        let editor = registry.dependency("virtual-editor").unwrap();
        let last = editor.or_dependencies().last().unwrap();
        assert_eq!(registry.get(*last).name(), "other-editor");
        assert!(editor.is_virtual());
    }

    #[test]
    fn full_names_match_catalog() {
        let registry = registry();
        let full = |n: &str| registry.dependency(n).map(Dependency::full_name).unwrap();
        assert_eq!(full("git"), "Git (git)");
        assert_eq!(full("pip"), "pip");
        assert_eq!(full("other-editor"), "other-editor");
        assert_eq!(full("python"), "Python version (python)");
        assert_eq!(full("jinja"), "Jinja (jinja)");
        assert_eq!(full("virtual-shell"), "command line shell (virtual-shell)");
    }

    #[test]
    fn configured_interpreter_is_used() {
        let registry = builtin("python3").build().unwrap();
        match registry.dependency("python").unwrap().probe() {
            Probe::Command(probe) => assert_eq!(probe.command, "python3"),
            other => panic!("unexpected probe {:?}", other),
        }
    }

    #[test]
    fn editor_task_file_is_in_home() {
        assert!(editor_task_path().ends_with(EDITOR_TASK_FILE));
    }
}
