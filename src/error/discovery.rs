use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("could not find an installation of Java")]
    JavaNotFound,

    #[error("could not find an installation of Kotlin")]
    KotlinNotFound,

    #[error("could not find the value of {variable} in /etc/environment")]
    EtcEnvironmentMiss { variable: String },
}

impl DiscoveryError {
    pub fn etc_environment_miss(variable: impl Into<String>) -> Self {
        Self::EtcEnvironmentMiss {
            variable: variable.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_not_found_display() {
        assert_eq!(
            DiscoveryError::JavaNotFound.to_string(),
            "could not find an installation of Java"
        );
    }

    #[test]
    fn test_etc_environment_miss_display() {
        let err = DiscoveryError::etc_environment_miss("JAVA_HOME");
        assert_eq!(
            err.to_string(),
            "could not find the value of JAVA_HOME in /etc/environment"
        );
    }
}
