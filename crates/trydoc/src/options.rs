//! Binding targets, one per handler signature.

use std::path::PathBuf;

use trydoc_flags::{Bind, Bound, Param, Result};
use url::Url;

/// Everything the server needs to start, shared by the root command and
/// `hosted`.
///
/// Each command only declares part of these names; the rest keep their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    pub root_directory: Option<PathBuf>,
    pub add_source: Option<PathBuf>,
    pub uri: Option<Url>,
    pub id: Option<String>,
    pub production: bool,
    pub language_service: bool,
    pub key: Option<String>,
    pub application_insights_key: Option<String>,
    pub region_id: Option<String>,
    pub log_to_file: bool,
}

impl Bind for StartOptions {
    const PARAMS: &'static [Param] = &[
        Param::optional("root_directory"),
        Param::optional("add_source"),
        Param::optional("uri"),
        Param::optional("id"),
        Param::optional("production"),
        Param::optional("language_service"),
        Param::optional("key"),
        Param::optional("application_insights_key"),
        Param::optional("region_id"),
        Param::optional("log_to_file"),
    ];

    fn bind(args: &Bound<'_>) -> Result<StartOptions> {
        Ok(StartOptions {
            root_directory: args.optional("root_directory")?,
            add_source: args.optional("add_source")?,
            uri: args.optional("uri")?,
            id: args.optional("id")?,
            production: args.or_default("production")?,
            language_service: args.or_default("language_service")?,
            key: args.optional("key")?,
            application_insights_key: args.optional("application_insights_key")?,
            region_id: args.optional("region_id")?,
            log_to_file: args.or_default("log_to_file")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubArgs {
    pub repo: String,
}

impl Bind for GithubArgs {
    const PARAMS: &'static [Param] = &[Param::required("repo")];

    fn bind(args: &Bound<'_>) -> Result<GithubArgs> {
        Ok(GithubArgs { repo: args.required("repo")? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackArgs {
    pub pack_target: PathBuf,
}

impl Bind for PackArgs {
    const PARAMS: &'static [Param] = &[Param::required("pack_target")];

    fn bind(args: &Bound<'_>) -> Result<PackArgs> {
        Ok(PackArgs { pack_target: args.required("pack_target")? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallArgs {
    pub package_name: String,
    pub add_source: Option<PathBuf>,
}

impl Bind for InstallArgs {
    const PARAMS: &'static [Param] = &[Param::required("package_name"), Param::optional("add_source")];

    fn bind(args: &Bound<'_>) -> Result<InstallArgs> {
        Ok(InstallArgs {
            package_name: args.required("package_name")?,
            add_source: args.optional("add_source")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyArgs {
    pub root_directory: PathBuf,
}

impl Bind for VerifyArgs {
    const PARAMS: &'static [Param] = &[Param::required("root_directory")];

    fn bind(args: &Bound<'_>) -> Result<VerifyArgs> {
        Ok(VerifyArgs { root_directory: args.required("root_directory")? })
    }
}
