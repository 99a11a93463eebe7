use std::{os::unix::fs::PermissionsExt, path::Path, str::FromStr};

use bmca::{
    config::{ClockAccuracy, ClockIdentity, ClockQuality, InstanceConfig},
    find_best, BmcaMode, Dataset, PortIdentity, PortSnapshot, PortState, StandardComparator,
};
use log::warn;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// The maximum amount of ports a single instance may have
pub const MAX_PORTS: usize = 16;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    #[serde(
        default = "default_loglevel",
        deserialize_with = "deserialize_loglevel"
    )]
    pub loglevel: log::LevelFilter,
    #[serde(deserialize_with = "deserialize_clock_identity")]
    pub clock_identity: ClockIdentity,
    #[serde(default = "default_priority")]
    pub priority1: u8,
    #[serde(default = "default_priority")]
    pub priority2: u8,
    #[serde(default = "default_clock_class")]
    pub clock_class: u8,
    #[serde(default = "default_clock_accuracy")]
    pub clock_accuracy: u8,
    #[serde(default = "default_offset_scaled_log_variance")]
    pub offset_scaled_log_variance: u16,
    #[serde(rename = "port", default)]
    pub ports: Vec<PortConfig>,
    /// Set by [`Config::from_file`] when others can write the file
    #[serde(skip)]
    pub unrestricted_permissions: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PortConfig {
    pub port_number: u16,
    #[serde(default = "default_port_state")]
    pub state: PortState,
    #[serde(default)]
    pub bmca: BmcaMode,
    #[serde(default)]
    pub foreign: Vec<ForeignConfig>,
}

/// The contents of a qualified announce message received on a port
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ForeignConfig {
    #[serde(deserialize_with = "deserialize_clock_identity")]
    pub grandmaster_identity: ClockIdentity,
    #[serde(default = "default_priority")]
    pub priority1: u8,
    #[serde(default = "default_priority")]
    pub priority2: u8,
    #[serde(default = "default_clock_class")]
    pub clock_class: u8,
    #[serde(default = "default_clock_accuracy")]
    pub clock_accuracy: u8,
    #[serde(default = "default_offset_scaled_log_variance")]
    pub offset_scaled_log_variance: u16,
    #[serde(default)]
    pub steps_removed: u16,
    #[serde(deserialize_with = "deserialize_clock_identity")]
    pub sender_identity: ClockIdentity,
    #[serde(default = "default_sender_port")]
    pub sender_port: u16,
}

fn default_loglevel() -> log::LevelFilter {
    log::LevelFilter::Info
}

fn default_priority() -> u8 {
    128
}

fn default_clock_class() -> u8 {
    ClockQuality::default().clock_class
}

fn default_clock_accuracy() -> u8 {
    ClockQuality::default().clock_accuracy.0
}

fn default_offset_scaled_log_variance() -> u16 {
    ClockQuality::default().offset_scaled_log_variance
}

fn default_port_state() -> PortState {
    PortState::Listening
}

fn default_sender_port() -> u16 {
    1
}

fn deserialize_loglevel<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<log::LevelFilter, D::Error> {
    let raw = String::deserialize(deserializer)?;
    log::LevelFilter::from_str(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_clock_identity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ClockIdentity, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_clock_identity(&raw).map_err(serde::de::Error::custom)
}

/// Parse a clock identity written as 16 hex digits, optionally separated by
/// colons (`00:1b:21:ff:fe:0a:bc:de`).
pub fn parse_clock_identity(raw: &str) -> Result<ClockIdentity, hex::FromHexError> {
    let digits: String = raw.chars().filter(|c| *c != ':').collect();

    let mut bytes = [0; 8];
    hex::decode_to_slice(digits, &mut bytes)?;

    Ok(ClockIdentity(bytes))
}

fn clock_quality(class: u8, accuracy: u8, offset_scaled_log_variance: u16) -> ClockQuality {
    ClockQuality {
        clock_class: class,
        clock_accuracy: ClockAccuracy(accuracy),
        offset_scaled_log_variance,
    }
}

fn others_can_write(mode: u32) -> bool {
    mode as libc::mode_t & libc::S_IWOTH != 0
}

impl Config {
    /// Parse config from file
    pub fn from_file(file: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let meta = std::fs::metadata(&file)?;
        let unrestricted_permissions = others_can_write(meta.permissions().mode());

        let contents = std::fs::read_to_string(file)?;
        let config: Config = toml::de::from_str(&contents)?;

        Ok(Config {
            unrestricted_permissions,
            ..config
        })
    }

    /// Check that the config is reasonable
    pub fn check(&self) -> bool {
        let mut ok = true;

        if self.unrestricted_permissions {
            warn!("Unrestricted config file permissions: Others can write.");
        }

        if self.ports.is_empty() {
            warn!("No ports configured.");
            ok = false;
        }

        if self.ports.len() > MAX_PORTS {
            warn!("Too many ports are configured.");
            ok = false;
        }

        for (i, port) in self.ports.iter().enumerate() {
            if port.port_number == 0 {
                warn!("Port numbers start at 1, port {} is invalid.", i + 1);
                ok = false;
            }

            if self.ports[..i]
                .iter()
                .any(|other| other.port_number == port.port_number)
            {
                warn!("Port number {} is used more than once.", port.port_number);
                ok = false;
            }
        }

        ok
    }

    pub fn instance_config(&self) -> InstanceConfig {
        InstanceConfig {
            clock_identity: self.clock_identity,
            priority_1: self.priority1,
            priority_2: self.priority2,
            clock_quality: clock_quality(
                self.clock_class,
                self.clock_accuracy,
                self.offset_scaled_log_variance,
            ),
        }
    }

    /// The state of every port for a run of the algorithm, including the best
    /// dataset heard on it
    pub fn snapshots(&self) -> Vec<PortSnapshot> {
        self.ports
            .iter()
            .map(|port| port.snapshot(self.clock_identity))
            .collect()
    }
}

impl PortConfig {
    pub fn port_config(&self) -> bmca::config::PortConfig {
        bmca::config::PortConfig {
            port_number: self.port_number,
            bmca_mode: self.bmca,
        }
    }

    fn snapshot(&self, clock_identity: ClockIdentity) -> PortSnapshot {
        let port_config = self.port_config();
        let port_identity = port_config.port_identity(clock_identity);

        let candidates: Vec<Dataset> = self
            .foreign
            .iter()
            .map(|foreign| foreign.dataset(port_identity))
            .collect();

        let best = find_best(&candidates, &StandardComparator).copied();
        if let Some(best) = &best {
            log::debug!(
                "Best of {} foreign masters on port {} is {}",
                candidates.len(),
                self.port_number,
                best.identity
            );
        }

        PortSnapshot {
            port_identity,
            best,
            state: self.state,
            bmca_mode: port_config.bmca_mode,
        }
    }
}

impl ForeignConfig {
    /// The dataset of this announcement as received on the port `receiver`
    pub fn dataset(&self, receiver: PortIdentity) -> Dataset {
        Dataset {
            identity: self.grandmaster_identity,
            priority_1: self.priority1,
            priority_2: self.priority2,
            quality: clock_quality(
                self.clock_class,
                self.clock_accuracy,
                self.offset_scaled_log_variance,
            ),
            steps_removed: self.steps_removed,
            sender: PortIdentity {
                clock_identity: self.sender_identity,
                port_number: self.sender_port,
            },
            receiver,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error while reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("config toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
        loglevel = "debug"
        clock-identity = "01:01:01:01:01:01:01:01"
        priority1 = 128
        priority2 = 128
        clock-class = 248

        [[port]]
        port-number = 1

        [[port.foreign]]
        grandmaster-identity = "0202020202020202"
        priority1 = 128
        clock-class = 6
        steps-removed = 1
        sender-identity = "03:03:03:03:03:03:03:03"
        sender-port = 2

        [[port.foreign]]
        grandmaster-identity = "0404040404040404"
        priority1 = 200
        sender-identity = "0404040404040404"

        [[port]]
        port-number = 2
        state = "master"
        bmca = "disabled"
    "#;

    #[test]
    fn parse_example() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();

        assert_eq!(config.loglevel, log::LevelFilter::Debug);
        assert_eq!(config.clock_identity, ClockIdentity([1; 8]));
        assert_eq!(config.clock_class, 248);
        assert_eq!(config.clock_accuracy, 0xfe);
        assert_eq!(config.offset_scaled_log_variance, 0xffff);
        assert_eq!(config.ports.len(), 2);

        let port = &config.ports[0];
        assert_eq!(port.state, PortState::Listening);
        assert_eq!(port.bmca, BmcaMode::Enabled);
        assert_eq!(port.foreign.len(), 2);
        assert_eq!(port.foreign[0].sender_port, 2);
        assert_eq!(port.foreign[1].sender_port, 1);
        assert_eq!(port.foreign[1].steps_removed, 0);

        let port = &config.ports[1];
        assert_eq!(port.state, PortState::Master);
        assert_eq!(port.bmca, BmcaMode::Disabled);
        assert!(port.foreign.is_empty());

        assert!(config.check());
    }

    #[test]
    fn minimal_config() {
        let config: Config = toml::from_str(
            r#"
            clock-identity = "0001020304050607"
            [[port]]
            port-number = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.loglevel, log::LevelFilter::Info);
        assert_eq!(config.priority1, 128);
        assert_eq!(config.priority2, 128);

        let instance = config.instance_config();
        assert_eq!(instance.clock_quality, ClockQuality::default());
    }

    #[test]
    fn reject_unknown_fields() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            clock-identity = "0001020304050607"
            domain = 0
            "#,
        );
        assert!(result.is_err());

        let result: Result<Config, _> = toml::from_str(
            r#"
            clock-identity = "0001020304050607"
            [[port]]
            port-number = 1
            interface = "eth0"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn reject_bad_loglevel() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            loglevel = "loud"
            clock-identity = "0001020304050607"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn clock_identity_forms() {
        let expected = ClockIdentity([0x00, 0x1b, 0x21, 0xff, 0xfe, 0x0a, 0xbc, 0xde]);

        assert_eq!(parse_clock_identity("001b21fffe0abcde").unwrap(), expected);
        assert_eq!(
            parse_clock_identity("00:1b:21:ff:fe:0a:bc:de").unwrap(),
            expected
        );
        assert_eq!(
            parse_clock_identity("00:1B:21:FF:FE:0A:BC:DE").unwrap(),
            expected
        );

        assert!(parse_clock_identity("001b21fffe0abc").is_err());
        assert!(parse_clock_identity("001b21fffe0abcde00").is_err());
        assert!(parse_clock_identity("001b21fffe0abcdz").is_err());
    }

    #[test]
    fn check_ports() {
        let mut config: Config = toml::from_str(EXAMPLE).unwrap();
        assert!(config.check());

        config.ports[1].port_number = 1;
        assert!(!config.check());

        config.ports[1].port_number = 0;
        assert!(!config.check());

        config.ports.clear();
        assert!(!config.check());
    }

    #[test]
    fn world_writable_permissions() {
        assert!(others_can_write(0o666));
        assert!(others_can_write(0o100602));
        assert!(!others_can_write(0o644));
        assert!(!others_can_write(0o660));
    }

    #[test]
    fn from_file_records_permissions() {
        let path =
            std::env::temp_dir().join(format!("bmca-config-{}.toml", std::process::id()));
        std::fs::write(&path, EXAMPLE).unwrap();

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(!config.unrestricted_permissions);

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o666)).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(config.unrestricted_permissions);
        // Only a warning, the config is still usable
        assert!(config.check());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn snapshot_selects_best_foreign_master() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();
        let snapshots = config.snapshots();

        assert_eq!(snapshots.len(), 2);

        let best = snapshots[0].best.unwrap();
        assert_eq!(best.identity, ClockIdentity([2; 8]));
        assert_eq!(best.steps_removed, 1);
        assert_eq!(
            best.sender,
            PortIdentity {
                clock_identity: ClockIdentity([3; 8]),
                port_number: 2,
            }
        );
        assert_eq!(
            best.receiver,
            PortIdentity {
                clock_identity: ClockIdentity([1; 8]),
                port_number: 1,
            }
        );

        assert_eq!(snapshots[1].best, None);
        assert_eq!(snapshots[1].state, PortState::Master);
        assert_eq!(snapshots[1].bmca_mode, BmcaMode::Disabled);
    }
}
