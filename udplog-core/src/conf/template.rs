/// Commented starter file written by `udplog config init`.
pub const STARTER_CONFIG: &str = include_str!("../../config-templates/udplog.hcl");
