//! HL7 v2.1 segment and composite tables
//!
//! Generated from the v2.1 segment and composite references; regenerate
//! instead of editing by hand. Segment indexes are field numbers, except
//! MSH where the field separator is not a split field and every index is
//! shifted down by one. Composite indexes are zero-based components.

use crate::model::StaticField as F;

/// Segment tables keyed by segment code
pub const SEGMENTS: &[(&str, &[F])] = &[
    ("MSH", MSH),
    ("PID", PID),
    ("ORC", ORC),
    ("OBR", OBR),
    ("OBX", OBX),
    ("NTE", NTE),
];

/// Composite tables keyed by datatype code
pub const COMPOSITES: &[(&str, &[F])] = &[
    ("AD", AD),
    ("CE", CE),
    ("CK", CK),
    ("CM", CM),
    ("CN", CN),
    ("CQ", CQ),
    ("PN", PN),
];

const MSH: &[F] = &[
    F::plain("encoding_characters", 1),
    F::plain("sending_application", 2),
    F::plain("sending_facility", 3),
    F::plain("receiving_application", 4),
    F::plain("receiving_facility", 5),
    F::timestamp("datetime_of_message", 6),
    F::plain("security", 7),
    F::composite("message_type", 8, "CM"),
    F::plain("message_control_id", 9),
    F::plain("processing_id", 10),
    F::numeric("version_id", 11),
    F::numeric("sequence_number", 12),
    F::plain("continuation_pointer", 13),
];

const PID: &[F] = &[
    F::plain("set_id_patient_id", 1),
    F::composite("patient_id_external_id", 2, "CK"),
    F::composite("patient_id_internal_id", 3, "CK"),
    F::plain("alternate_patient_id", 4),
    F::composite("patient_name", 5, "PN"),
    F::plain("mothers_maiden_name", 6),
    F::timestamp("date_of_birth", 7),
    F::plain("sex", 8),
    F::composite("patient_alias", 9, "PN"),
    F::plain("race", 10),
    F::composite("patient_address", 11, "AD"),
    F::plain("county_code", 12),
    F::plain("phone_number_home", 13),
    F::plain("phone_number_business", 14),
    F::plain("language_patient", 15),
    F::plain("marital_status", 16),
    F::plain("religion", 17),
    F::composite("patient_account_number", 18, "CK"),
    F::plain("social_security_number_patient", 19),
    F::composite("drivers_license_number_patient", 20, "CM"),
];

const ORC: &[F] = &[
    F::plain("order_control", 1),
    F::composite("placer_order_num", 2, "CM"),
    F::composite("filler_order_num", 3, "CM"),
    F::composite("placer_group_num", 4, "CM"),
    F::plain("order_status", 5),
    F::plain("response_flag", 6),
    F::composite("timingquantity", 7, "CM"),
    F::composite("parent", 8, "CM"),
    F::timestamp("datetime_of_transaction", 9),
    F::composite("entered_by", 10, "CN"),
    F::composite("verified_by", 11, "CN"),
    F::composite("ordering_provider", 12, "CN"),
    F::composite("enterers_location", 13, "CM"),
    F::plain("call_back_phone_number", 14),
];

const OBR: &[F] = &[
    F::plain("set_id_observation_request", 1),
    F::composite("placer_order_num", 2, "CM"),
    F::composite("filler_order_num", 3, "CM"),
    F::composite("universal_service_id", 4, "CE"),
    F::plain("priority", 5),
    F::timestamp("requested_date_time", 6),
    F::timestamp("observation_datetime", 7),
    F::timestamp("observation_end_datetime", 8),
    F::composite("collection_volume", 9, "CQ"),
    F::composite("collector_identifier", 10, "CN"),
    F::plain("specimen_action_code", 11),
    F::composite("danger_code", 12, "CM"),
    F::plain("relevant_clinical_info", 13),
    F::timestamp("specimen_received_datetime", 14),
    F::composite("specimen_source", 15, "CM"),
    F::composite("ordering_provider", 16, "CN"),
    F::plain("order_callback_phone_number", 17),
    F::plain("placer_field_num1", 18),
    F::plain("placer_field_num2", 19),
    F::plain("filler_field_num1", 20),
    F::plain("filler_field_num2", 21),
    F::timestamp("results_rptstatus_chng_datetime", 22),
    F::composite("charge_to_practice", 23, "CM"),
    F::plain("diagnostic_serv_sect_id", 24),
    F::plain("result_status", 25),
    F::composite("linked_results", 26, "CE"),
    F::composite("quantitytiming", 27, "CM"),
    F::composite("result_copies_to", 28, "CN"),
    F::composite("parent_accession_num", 29, "CM"),
    F::plain("transportation_mode", 30),
    F::composite("reason_for_study", 31, "CE"),
    F::composite("principal_result_interpreter", 32, "CN"),
    F::composite("assistant_result_interpreter", 33, "CN"),
    F::composite("technician", 34, "CN"),
    F::composite("transcriptionist", 35, "CN"),
    F::timestamp("scheduled_datetime", 36),
];

const OBX: &[F] = &[
    F::plain("set_id_observational_simple", 1),
    F::plain("value_type", 2),
    F::composite("observation_identifier", 3, "CE"),
    F::plain("observation_sub_id", 4),
    F::plain("observation_results", 5),
    F::plain("units", 6),
    F::plain("references_range", 7),
    F::plain("abnormal_flags", 8),
    F::numeric("probability", 9),
    F::plain("nature_of_abnormal_test", 10),
    F::plain("observ_result_status", 11),
    F::timestamp("date_last_obs_normal_values", 12),
];

const NTE: &[F] = &[
    F::plain("set_id_notes_and_comments", 1),
    F::plain("source_of_comment", 2),
    F::plain("comment", 3),
];

const AD: &[F] = &[
    F::plain("street_address", 0),
    F::plain("other_designation", 1),
    F::plain("city", 2),
    F::plain("state_or_province", 3),
    F::plain("zip_or_postal_code", 4),
    F::plain("country", 5),
];

const CE: &[F] = &[
    F::plain("identifier", 0),
    F::plain("text", 1),
    F::plain("name_of_coding_system", 2),
];

const CK: &[F] = &[
    F::numeric("id_number", 0),
    F::numeric("check_digit", 1),
];

const CM: &[F] = &[
    F::plain("field1", 0),
    F::plain("field2", 1),
    F::plain("field3", 2),
    F::plain("field4", 3),
    F::plain("field5", 4),
    F::plain("field6", 5),
];

const CN: &[F] = &[
    F::plain("id_number", 0),
    F::plain("family_name", 1),
    F::plain("given_name", 2),
    F::plain("middle_initial", 3),
    F::plain("suffix", 4),
    F::plain("prefix", 5),
];

const CQ: &[F] = &[
    F::numeric("quantity", 0),
    F::composite("units", 1, "CE"),
];

const PN: &[F] = &[
    F::plain("family_name", 0),
    F::plain("given_name", 1),
    F::plain("middle_initial", 2),
    F::plain("suffix", 3),
    F::plain("prefix", 4),
    F::plain("degree", 5),
];
