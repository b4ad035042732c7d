// stagehand-deploy/src/pipelines/commands.rs

//! Builds the external commands each deploy stage runs. Pure functions of the
//! config, so the exact command lines can be checked without spawning anything.

use crate::config::DeployConfig;
use stagehand::CommandSpec;

/// `docker build -t <image> .` in the project directory.
pub fn build_image(config: &DeployConfig) -> CommandSpec {
  CommandSpec::new("docker")
    .args(["build", "-t", config.image_name.as_str(), "."])
    .current_dir(&config.project_dir)
}

/// `docker save <image> | gzip > <artifact>`; needs a shell for the pipe.
pub fn package_artifact(config: &DeployConfig) -> CommandSpec {
  CommandSpec::shell(format!(
    "docker save {} | gzip > {}",
    config.image_name, config.artifact_name
  ))
  .current_dir(&config.project_dir)
}

/// Copies the artifact into the remote user's home, tunnelling through the jump host.
pub fn ship_artifact(config: &DeployConfig) -> CommandSpec {
  CommandSpec::new("scp")
    .arg("-o")
    .arg(format!("ProxyJump={}", config.jump_host))
    .arg(config.artifact_name.as_str())
    .arg(format!("{}:~/", config.remote_target()))
    .current_dir(&config.project_dir)
}

/// Runs the remote script over ssh through the jump host.
pub fn run_remote(config: &DeployConfig) -> CommandSpec {
  CommandSpec::new("ssh")
    .args(["-J", config.jump_host.as_str()])
    .arg(config.remote_target())
    .arg(remote_script(config))
}

/// Environment passed to the application container.
pub fn container_env(config: &DeployConfig) -> Vec<(String, String)> {
  let mut vars = vec![
    ("NODE_ENV".to_string(), "production".to_string()),
    ("API_PORT".to_string(), config.container_port.to_string()),
    ("DB_FILE".to_string(), "/app/data/notes.db".to_string()),
    ("ADMIN_EMAILS".to_string(), "admin".to_string()),
    ("ALLOW_REGISTRATION".to_string(), "false".to_string()),
  ];
  if let Some(secret) = &config.jwt_secret {
    vars.push(("JWT_SECRET".to_string(), secret.clone()));
  }
  vars
}

/// Script executed on the VM: load the shipped image, replace the running
/// container, then check it is up.
pub fn remote_script(config: &DeployConfig) -> String {
  let name = &config.container_name;
  let env_flags: String = container_env(config)
    .iter()
    .map(|(key, value)| format!("  -e {}={} \\\n", key, quote(value)))
    .collect();

  format!(
    "echo '--> Loading image...'\n\
     gunzip -c ~/{artifact} | sudo docker load\n\
     echo '--> Cleaning up old container...'\n\
     sudo docker rm -f {name} 2>/dev/null || true\n\
     echo '--> Starting application...'\n\
     sudo docker run -d \\\n  \
     --name {name} \\\n  \
     --restart unless-stopped \\\n  \
     -p {host_port}:{container_port} \\\n\
     {env_flags}  \
     -v {data_dir}:/app/data \\\n  \
     {image}\n\
     echo '--> Verifying...'\n\
     sudo docker ps | grep {name}\n",
    artifact = config.artifact_name,
    name = name,
    host_port = config.host_port,
    container_port = config.container_port,
    env_flags = env_flags,
    data_dir = config.data_dir,
    image = config.image_name,
  )
}

// Double-quotes a value for the remote shell unless it is plainly safe.
fn quote(value: &str) -> String {
  let safe = !value.is_empty()
    && value
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | ':' | '@'));
  if safe {
    value.to_string()
  } else {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$").replace('`', "\\`"))
  }
}
