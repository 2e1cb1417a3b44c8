//! Standard types shared by all drivers.

/// Identifier of a software module, as used in diagnostic reports.
pub type ModuleId = u16;

/// Identifier of the vendor that produced a module.
pub type VendorId = u16;

/// Instance of a module when more than one exists.
pub type InstanceId = u8;

/// Identifier of the API service that detected an error.
pub type ServiceId = u8;

/// Module specific error code.
pub type ErrorId = u8;

/// Version information published by a driver.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub vendor_id: VendorId,
    pub module_id: ModuleId,
    pub instance_id: InstanceId,
    pub sw_major_version: u8,
    pub sw_minor_version: u8,
    pub sw_patch_version: u8,
}

/// A `major.minor.patch` triple.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Usable in `const` assertions, where `PartialEq` is not.
    pub const fn same_as(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }
}

impl core::fmt::Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_display() {
        assert_eq!(Version::new(4, 0, 3).to_string(), "4.0.3");
    }

    #[test]
    fn version_same_as() {
        assert!(Version::new(1, 0, 0).same_as(&Version::new(1, 0, 0)));
        assert!(!Version::new(1, 0, 0).same_as(&Version::new(1, 1, 0)));
    }
}
