use std::path::Path;

use super::{AttributionProfile, PROFILE_DSL_VERSION, ProfileError};

/// Load and validate a single attribution profile from a TOML file.
pub fn load_profile(path: &Path) -> Result<AttributionProfile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let profile: AttributionProfile =
        toml::from_str(&content).map_err(|source| ProfileError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;

    if profile.version != PROFILE_DSL_VERSION {
        return Err(ProfileError::UnsupportedVersion {
            path: path.to_path_buf(),
            version: profile.version,
        });
    }

    profile.validate().map_err(|reason| ProfileError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    tracing::debug!(
        name = %profile.name,
        eligible = profile.eligible_abilities.len(),
        "loaded attribution profile"
    );

    Ok(profile)
}
