// stagehand-deploy/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Everything the deploy stages need to know, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
  /// Local directory holding the Dockerfile; all local commands run here.
  pub project_dir: PathBuf,

  pub image_name: String,
  pub artifact_name: String,

  // Remote target, reached through the jump host
  pub jump_host: String,
  pub vm_host: String,
  pub vm_ip: String,
  pub vm_user: String,

  // Container runtime settings on the VM
  pub container_name: String,
  pub host_port: u16,
  pub container_port: u16,
  pub data_dir: String,
  pub jwt_secret: Option<String>,

  pub public_url: String,
}

impl DeployConfig {
  pub fn from_env(project_dir: PathBuf) -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(project_dir, |key| env::var(key).ok())
  }

  /// Builds the config from any key lookup, falling back to the built-in defaults.
  pub fn from_lookup(project_dir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |key: &str, default: &str| {
      lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
    };
    let get_port = |key: &str, default: u16| -> Result<u16> {
      match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
          .trim()
          .parse::<u16>()
          .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
      }
    };

    let config = Self {
      project_dir,
      image_name: get_or("DEPLOY_IMAGE_NAME", "glassy-dash:prod"),
      artifact_name: get_or("DEPLOY_ARTIFACT_NAME", "glassy-dash.tar.gz"),
      jump_host: get_or("DEPLOY_JUMP_HOST", "glassy-jump"),
      vm_host: get_or("DEPLOY_VM_HOST", "glassy-vm"),
      vm_ip: get_or("DEPLOY_VM_IP", "192.168.122.45"),
      vm_user: get_or("DEPLOY_VM_USER", "pozi"),
      container_name: get_or("DEPLOY_CONTAINER_NAME", "GLASSYDASH"),
      host_port: get_port("DEPLOY_HOST_PORT", 3001)?,
      container_port: get_port("DEPLOY_CONTAINER_PORT", 8080)?,
      data_dir: get_or("DEPLOY_DATA_DIR", "~/.GLASSYDASH"),
      jwt_secret: lookup("DEPLOY_JWT_SECRET").filter(|v| !v.is_empty()),
      public_url: get_or("DEPLOY_PUBLIC_URL", "http://dash.0rel.com"),
    };

    tracing::debug!(
      image = %config.image_name,
      target = %config.remote_target(),
      jump_host = %config.jump_host,
      "Deploy configuration loaded."
    );
    Ok(config)
  }

  /// `user@ip`, as understood by scp and ssh.
  pub fn remote_target(&self) -> String {
    format!("{}@{}", self.vm_user, self.vm_ip)
  }

  pub fn artifact_path(&self) -> PathBuf {
    self.project_dir.join(&self.artifact_name)
  }

  pub fn dockerfile_path(&self) -> PathBuf {
    self.project_dir.join("Dockerfile")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn defaults_apply_when_nothing_is_set() {
    let config = DeployConfig::from_lookup(PathBuf::from("."), |_| None).unwrap();
    assert_eq!(config.image_name, "glassy-dash:prod");
    assert_eq!(config.artifact_name, "glassy-dash.tar.gz");
    assert_eq!(config.remote_target(), "pozi@192.168.122.45");
    assert_eq!((config.host_port, config.container_port), (3001, 8080));
    assert_eq!(config.jwt_secret, None);
  }

  #[test]
  fn environment_overrides_defaults() {
    let lookup = lookup_from(&[
      ("DEPLOY_IMAGE_NAME", "notes:staging"),
      ("DEPLOY_VM_USER", "deploy"),
      ("DEPLOY_HOST_PORT", "4000"),
      ("DEPLOY_JWT_SECRET", "s3cret"),
      ("DEPLOY_JUMP_HOST", "  "),
    ]);
    let config = DeployConfig::from_lookup(PathBuf::from("/srv/app"), lookup).unwrap();
    assert_eq!(config.image_name, "notes:staging");
    assert_eq!(config.vm_user, "deploy");
    assert_eq!(config.host_port, 4000);
    assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
    assert_eq!(config.jump_host, "glassy-jump");
    assert_eq!(config.artifact_path(), PathBuf::from("/srv/app/glassy-dash.tar.gz"));
  }

  #[test]
  fn invalid_port_is_a_config_error() {
    let lookup = lookup_from(&[("DEPLOY_CONTAINER_PORT", "eighty")]);
    let err = DeployConfig::from_lookup(PathBuf::from("."), lookup).unwrap_err();
    assert!(matches!(err, AppError::Config(msg) if msg.contains("DEPLOY_CONTAINER_PORT")));
  }
}
