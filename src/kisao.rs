//! Read-only lookup of KiSAO term names
//!
//! Covers the algorithm and parameter terms most often found in simulation
//! experiments. The table is built on first use and never changes.

use std::collections::HashMap;
use std::sync::LazyLock;

static KISAO_NAMES: LazyLock<HashMap<u32, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (19, "CVODE"),
        (27, "Gibson-Bruck next reaction algorithm"),
        (29, "Gillespie direct algorithm"),
        (30, "Euler forward method"),
        (32, "explicit fourth-order Runge-Kutta method"),
        (33, "Rosenbrock method"),
        (64, "Runge-Kutta based method"),
        (86, "Fehlberg method"),
        (88, "LSODA"),
        (89, "LSODAR"),
        (94, "Livermore solver"),
        (209, "relative tolerance"),
        (211, "absolute tolerance"),
        (216, "integrate reduced model"),
        (241, "Gillespie-like method"),
        (261, "Euler method"),
        (263, "NFSim agent-based simulation method"),
        (280, "Adams-Moulton method"),
        (282, "KINSOL"),
        (283, "IDA"),
        (407, "steady state method"),
        (408, "Newton-type method"),
        (409, "ordinary Newton method"),
        (415, "maximum number of steps"),
        (433, "CVODE-like method"),
        (437, "flux balance analysis"),
        (488, "seed"),
        (499, "dynamic flux balance analysis"),
        (568, "NLEQ1"),
    ])
});

/// Term number of a KiSAO identifier such as `KISAO:0000019` or `KISAO_0000019`
pub fn kisao_number(kisao_id: &str) -> Option<u32> {
    let (_, digits) = kisao_id
        .split_once(':')
        .or_else(|| kisao_id.split_once('_'))?;
    digits.trim().parse().ok()
}

/// Name of the KiSAO term with number `number`
pub fn name_for_number(number: u32) -> Option<&'static str> {
    KISAO_NAMES.get(&number).copied()
}

/// Name of the KiSAO term identified by `kisao_id`
pub fn name_for(kisao_id: &str) -> Option<&'static str> {
    name_for_number(kisao_number(kisao_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parsing() {
        assert_eq!(kisao_number("KISAO:0000019"), Some(19));
        assert_eq!(kisao_number("KISAO_0000088"), Some(88));
        assert_eq!(kisao_number("CVODE"), None);
        assert_eq!(kisao_number("KISAO:abc"), None);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(name_for("KISAO:0000019"), Some("CVODE"));
        assert_eq!(name_for("KISAO:0009999"), None);
    }
}
