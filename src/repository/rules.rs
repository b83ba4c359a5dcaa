// file: src/repository/rules.rs
// description: built-in rule tables for test, build and infrastructure files
// reference: language and tool conventions for test, build and iac layouts

use crate::models::Category;
use serde::{Deserialize, Serialize};

/// Signals that place a file in one category. All entries are matched
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryRules {
    /// Suffixes of the file name, e.g. `.tf` or `_test.go`.
    pub extensions: Vec<String>,
    /// Directory patterns ending in `/`, matched at a segment boundary.
    pub path_segments: Vec<String>,
    /// Whole file names; `*` matches any run of characters.
    pub filenames: Vec<String>,
    /// Substrings of the full path.
    pub keywords: Vec<String>,
}

impl CategoryRules {
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
            && self.path_segments.is_empty()
            && self.filenames.is_empty()
            && self.keywords.is_empty()
    }

    /// Appends `extra` after the existing entries. Path segments without a
    /// trailing `/` get one so they still match at a directory boundary.
    pub fn extend(&mut self, extra: &CategoryRules) {
        self.extensions.extend(extra.extensions.iter().cloned());
        self.path_segments
            .extend(extra.path_segments.iter().map(|segment| {
                if segment.ends_with('/') {
                    segment.clone()
                } else {
                    format!("{}/", segment)
                }
            }));
        self.filenames.extend(extra.filenames.iter().cloned());
        self.keywords.extend(extra.keywords.iter().cloned());
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rule sets in classification order.
///
/// Development carries no rules of its own: it is the fallback, and any rule
/// there would shadow the categories visited after it.
pub fn builtin_rules() -> Vec<(Category, CategoryRules)> {
    vec![
        (Category::Development, CategoryRules::default()),
        (Category::Test, test_rules()),
        (Category::Build, build_rules()),
        (Category::Infrastructure, infrastructure_rules()),
    ]
}

fn test_rules() -> CategoryRules {
    CategoryRules {
        extensions: owned(&[
            ".test.js", ".test.ts", ".test.jsx", ".test.tsx", ".test.mjs",
            ".spec.js", ".spec.ts", ".spec.jsx", ".spec.tsx", ".spec.mjs",
            "_test.py", "_test.go", "_test.rs", "_test.rb", "_test.php",
            "_spec.rb", ".tests.cs",
        ]),
        path_segments: owned(&[
            "test/", "tests/", "testing/", "__tests__/", "spec/", "specs/", "src/test/",
        ]),
        filenames: owned(&[
            "test_*.py", "test_*.rb", "test_*.rs", "test_*.php", "spec_*.rb",
            "*Test.java", "*Tests.java", "Test*.java",
            "*Test.cs", "*Tests.cs",
            "*Test.php",
            "*Test.swift", "*Tests.swift",
            "conftest.py",
        ]),
        keywords: owned(&["__snapshots__", "fixtures/", "testdata/"]),
    }
}

fn build_rules() -> CategoryRules {
    CategoryRules {
        extensions: owned(&[
            ".gradle", ".gradle.kts", ".mk", ".cmake",
            ".csproj", ".vbproj", ".fsproj", ".sln", ".props", ".targets",
            ".gemspec", ".sbt",
        ]),
        path_segments: owned(&[".mvn/", "gradle/wrapper/", ".cargo/"]),
        filenames: owned(&[
            // python
            "setup.py", "setup.cfg", "pyproject.toml", "requirements*.txt",
            "*requirements.txt", "Pipfile", "Pipfile.lock", "poetry.lock",
            "environment.yml", "tox.ini", "noxfile.py", "MANIFEST.in",
            // javascript
            "package.json", "package-lock.json", "yarn.lock", "pnpm-lock.yaml",
            "tsconfig.json", "jsconfig.json", "angular.json", ".babelrc",
            "webpack.*.js", "rollup.*.js", "vite.config.*", "*.config.js",
            "*.config.ts", "*.config.mjs", "*.config.json", ".eslintrc*", ".prettierrc*",
            // jvm
            "pom.xml", "build.gradle", "settings.gradle", "gradle.properties",
            "gradlew", "gradlew.bat", "build.sbt",
            // c and c++
            "Makefile", "Makefile.*", "CMakeLists.txt", "configure.ac",
            "configure.in", "meson.build", "conanfile.txt", "conanfile.py",
            "vcpkg.json", "BUILD", "BUILD.bazel", "WORKSPACE", "WORKSPACE.bazel",
            // .net
            "Directory.Build.props", "Directory.Build.targets",
            "Directory.Packages.props", "global.json", "nuget.config",
            "packages.config",
            // go
            "go.mod", "go.sum", "go.work", "go.work.sum", "Gopkg.toml", "Gopkg.lock",
            // rust
            "Cargo.toml", "Cargo.lock", "build.rs", "rust-toolchain",
            "rust-toolchain.toml",
            // ruby
            "Gemfile", "Gemfile.lock", "Rakefile", "gems.rb", "gems.locked",
            // php
            "composer.json", "composer.lock", "phpunit.xml", "phpunit.xml.dist",
            "build.xml",
            // swift
            "Package.swift", "Package.resolved", "Podfile", "Podfile.lock",
            "Cartfile", "Cartfile.resolved",
            // task runners
            "Taskfile.yml", "Taskfile.yaml", "justfile", "dodo.py",
        ]),
        keywords: owned(&["webpack", "makefile"]),
    }
}

fn infrastructure_rules() -> CategoryRules {
    CategoryRules {
        extensions: owned(&[".tf", ".tfvars", ".tfstate", ".hcl", ".nomad", ".bicep"]),
        path_segments: owned(&[
            ".github/workflows/", ".circleci/", ".buildkite/", "terraform/",
            ".terraform/", "k8s/", "kubernetes/", "manifests/", "helm/",
            "charts/", "ansible/", "deploy/", "deployment/", "infra/",
            "infrastructure/",
        ]),
        filenames: owned(&[
            "Dockerfile", "Dockerfile.*", "*.dockerfile", "Containerfile",
            ".dockerignore", "docker-compose*.yml", "docker-compose*.yaml",
            "compose.yml", "compose.yaml",
            "Jenkinsfile", ".gitlab-ci.yml", ".travis.yml", "appveyor.yml",
            "azure-pipelines.yml", "bitbucket-pipelines.yml", "buildspec.yml",
            "cloudbuild.yaml", "cloudbuild.yml", "codecov.yml", ".codecov.yml",
            "Vagrantfile", "Procfile", "serverless.yml", "Chart.yaml",
            "kustomization.yaml", "skaffold.yaml", "terraform.tfstate.backup",
        ]),
        keywords: owned(&["docker", "terraform", "kubernetes", "ansible", "pulumi"]),
    }
}
