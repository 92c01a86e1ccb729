//! Accessor-local field tables
//!
//! These names are resolved before the version table, so they read the same
//! in every HL7 version even where the generated names differ
//! (`date_of_birth` in 2.1 against `datetime_of_birth` in 2.4).

use hl7_schema::{Decoder, StaticField as F};

/// OBX-2, read by the observation value dispatcher
pub const VALUE_TYPE_FIELD: usize = 2;

/// ORC-3 / OBR-3, used to pair orders with requests
pub const FILLER_ORDER_FIELD: usize = 3;

const PID: &[F] = &[
    F::plain("patients_name", 5),
    F::timestamp("datetime_of_birth", 7),
    F::plain("patient_id_external_id", 2),
    F::plain("patient_id_internal_id", 3),
];

const ORC: &[F] = &[
    F::plain("request_id", 4),
    F::plain("provider", 12),
    F::plain("filler_order_number", FILLER_ORDER_FIELD),
];

const OBR: &[F] = &[
    F::plain("set_id", 1),
    F::plain("filler_order_number", FILLER_ORDER_FIELD),
];

const OBX: &[F] = &[
    F::plain("set_id", 1),
    F::with_decoder("valuetype", VALUE_TYPE_FIELD, Decoder::ValueType),
    F::plain("identifier", 3),
    F::plain("sub_id", 4),
    F::with_decoder("result", 5, Decoder::ObservationValue),
    F::plain("units", 6),
    F::plain("reference_range", 7),
    F::timestamp("effective_date_of_reference_range", 12),
    F::plain("user_defined_access_checks", 13),
    F::timestamp("datetime_of_the_observation", 14),
    F::plain("producers_id", 15),
    F::plain("responsible_observer", 16),
    F::plain("observation_method", 17),
    F::plain("equipment_instance_identifier", 18),
    F::timestamp("datetime_of_the_analysis", 19),
];

const NTE: &[F] = &[F::plain("set_id", 1), F::plain("comment", 3)];

/// Override entries for a segment code, in declaration order
pub fn overrides_for(code: &str) -> &'static [F] {
    match code {
        "PID" => PID,
        "ORC" => ORC,
        "OBR" => OBR,
        "OBX" => OBX,
        "NTE" => NTE,
        _ => &[],
    }
}

/// Override entry for a segment code and field name
pub fn lookup(code: &str, name: &str) -> Option<&'static F> {
    overrides_for(code).iter().find(|field| field.name == name)
}
