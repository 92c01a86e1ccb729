//! HL7 v2.3 segment and composite tables
//!
//! Generated from the v2.3 segment and composite references; regenerate
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
    ("CE", CE),
    ("CK", CK),
    ("CM", CM),
    ("CQ", CQ),
    ("CX", CX),
    ("DLN", DLN),
    ("EI", EI),
    ("HD", HD),
    ("PL", PL),
    ("PT", PT),
    ("SN", SN),
    ("TQ", TQ),
    ("XAD", XAD),
    ("XCN", XCN),
    ("XPN", XPN),
    ("XTN", XTN),
];

const MSH: &[F] = &[
    F::plain("encoding_characters", 1),
    F::composite("sending_application", 2, "HD"),
    F::composite("sending_facility", 3, "HD"),
    F::composite("receiving_application", 4, "HD"),
    F::composite("receiving_facility", 5, "HD"),
    F::timestamp("datetime_of_message", 6),
    F::plain("security", 7),
    F::composite("message_type", 8, "CM"),
    F::plain("message_control_id", 9),
    F::composite("processing_id", 10, "PT"),
    F::plain("version_id", 11),
    F::numeric("sequence_number", 12),
    F::plain("continuation_pointer", 13),
    F::plain("accept_acknowledgment_type", 14),
    F::plain("application_acknowledgment_type", 15),
    F::plain("country_code", 16),
    F::plain("character_set", 17),
    F::composite("principal_language_of_message", 18, "CE"),
];

const PID: &[F] = &[
    F::plain("set_id_patient_id", 1),
    F::composite("patient_id_external_id", 2, "CX"),
    F::composite("patient_id_internal_id", 3, "CX"),
    F::composite("alternate_patient_id", 4, "CX"),
    F::composite("patient_name", 5, "XPN"),
    F::composite("mothers_maiden_name", 6, "XPN"),
    F::timestamp("date_of_birth", 7),
    F::plain("sex", 8),
    F::composite("patient_alias", 9, "XPN"),
    F::plain("race", 10),
    F::composite("patient_address", 11, "XAD"),
    F::plain("county_code", 12),
    F::composite("phone_number_home", 13, "XTN"),
    F::composite("phone_number_business", 14, "XTN"),
    F::composite("primary_language", 15, "CE"),
    F::plain("marital_status", 16),
    F::plain("religion", 17),
    F::composite("patient_account_number", 18, "CX"),
    F::plain("ssn_number_patient", 19),
    F::composite("drivers_license_number_patient", 20, "DLN"),
    F::composite("mothers_identifier", 21, "CX"),
    F::plain("ethnic_group", 22),
    F::plain("birth_place", 23),
    F::plain("multiple_birth_indicator", 24),
    F::numeric("birth_order", 25),
    F::plain("citizenship", 26),
    F::composite("veterans_military_status", 27, "CE"),
    F::composite("nationality", 28, "CE"),
    F::timestamp("patient_death_date_and_time", 29),
    F::plain("patient_death_indicator", 30),
];

const ORC: &[F] = &[
    F::plain("order_control", 1),
    F::composite("placer_order_number", 2, "EI"),
    F::composite("filler_order_number", 3, "EI"),
    F::composite("placer_group_number", 4, "EI"),
    F::plain("order_status", 5),
    F::plain("response_flag", 6),
    F::composite("quantitytiming", 7, "TQ"),
    F::composite("parent", 8, "CM"),
    F::timestamp("datetime_of_transaction", 9),
    F::composite("entered_by", 10, "XCN"),
    F::composite("verified_by", 11, "XCN"),
    F::composite("ordering_provider", 12, "XCN"),
    F::composite("enterers_location", 13, "PL"),
    F::composite("call_back_phone_number", 14, "XTN"),
    F::timestamp("order_effective_datetime", 15),
    F::composite("order_control_code_reason", 16, "CE"),
    F::composite("entering_organization", 17, "CE"),
    F::composite("entering_device", 18, "CE"),
    F::composite("action_by", 19, "XCN"),
];

const OBR: &[F] = &[
    F::plain("set_id_observation_request", 1),
    F::composite("placer_order_number", 2, "EI"),
    F::composite("filler_order_number", 3, "EI"),
    F::composite("universal_service_identifier", 4, "CE"),
    F::plain("priority", 5),
    F::timestamp("requested_datetime", 6),
    F::timestamp("observation_datetime", 7),
    F::timestamp("observation_end_datetime", 8),
    F::composite("collection_volume", 9, "CQ"),
    F::composite("collector_identifier", 10, "XCN"),
    F::plain("specimen_action_code", 11),
    F::composite("danger_code", 12, "CE"),
    F::plain("relevant_clinical_info", 13),
    F::timestamp("specimen_received_datetime", 14),
    F::composite("specimen_source", 15, "CM"),
    F::composite("ordering_provider", 16, "XCN"),
    F::composite("order_callback_phone_number", 17, "XTN"),
    F::plain("placer_field_1", 18),
    F::plain("placer_field_2", 19),
    F::plain("filler_field_1", 20),
    F::plain("filler_field_2", 21),
    F::timestamp("results_rptstatus_chng_datetime", 22),
    F::composite("charge_to_practice", 23, "CM"),
    F::plain("diagnostic_serv_sect_id", 24),
    F::plain("result_status", 25),
    F::composite("parent_result", 26, "CM"),
    F::composite("quantitytiming", 27, "TQ"),
    F::composite("result_copies_to", 28, "XCN"),
    F::composite("parent_number", 29, "CM"),
    F::plain("transportation_mode", 30),
    F::composite("reason_for_study", 31, "CE"),
    F::composite("principal_result_interpreter", 32, "CM"),
    F::composite("assistant_result_interpreter", 33, "CM"),
    F::composite("technician", 34, "CM"),
    F::composite("transcriptionist", 35, "CM"),
    F::timestamp("scheduled_datetime", 36),
    F::numeric("number_of_sample_containers", 37),
    F::composite("transport_logistics_of_collected_sample", 38, "CE"),
    F::composite("collectors_comment", 39, "CE"),
    F::composite("transport_arrangement_responsibility", 40, "CE"),
    F::plain("transport_arranged", 41),
    F::plain("escort_required", 42),
    F::composite("planned_patient_transport_comment", 43, "CE"),
];

const OBX: &[F] = &[
    F::plain("set_id_obx", 1),
    F::plain("value_type", 2),
    F::composite("observation_identifier", 3, "CE"),
    F::plain("observation_sub_id", 4),
    F::plain("observation_value", 5),
    F::composite("units", 6, "CE"),
    F::plain("reference_range", 7),
    F::plain("abnormal_flags", 8),
    F::numeric("probability", 9),
    F::plain("nature_of_abnormal_test", 10),
    F::plain("observation_result_status", 11),
    F::timestamp("date_last_observation_normal_values", 12),
    F::plain("user_defined_access_checks", 13),
    F::timestamp("datetime_of_the_observation", 14),
    F::composite("producers_id", 15, "CE"),
    F::composite("responsible_observer", 16, "XCN"),
    F::composite("observation_method", 17, "CE"),
];

const NTE: &[F] = &[
    F::plain("set_id_notes_and_comments", 1),
    F::plain("source_of_comment", 2),
    F::plain("comment", 3),
];

const CE: &[F] = &[
    F::plain("identifier", 0),
    F::plain("text", 1),
    F::plain("name_of_coding_system", 2),
    F::plain("alternate_identifier", 3),
    F::plain("alternate_text", 4),
    F::plain("name_of_alternate_coding_system", 5),
];

const CK: &[F] = &[
    F::numeric("id_number", 0),
    F::numeric("check_digit", 1),
    F::plain("code_identifying_the_check_digit_scheme_employed", 2),
];

const CM: &[F] = &[
    F::plain("field1", 0),
    F::plain("field2", 1),
    F::plain("field3", 2),
    F::plain("field4", 3),
    F::plain("field5", 4),
    F::plain("field6", 5),
];

const CQ: &[F] = &[
    F::numeric("quantity", 0),
    F::composite("units", 1, "CE"),
];

const CX: &[F] = &[
    F::plain("id", 0),
    F::plain("check_digit", 1),
    F::plain("code_identifying_the_check_digit_scheme_employed", 2),
    F::composite("assigning_authority", 3, "HD"),
    F::plain("identifier_type_code", 4),
    F::composite("assigning_facility", 5, "HD"),
];

const DLN: &[F] = &[
    F::plain("drivers_license_number", 0),
    F::plain("issuing_state_province_country", 1),
    F::timestamp("expiration_date", 2),
];

const EI: &[F] = &[
    F::plain("entity_identifier", 0),
    F::plain("namespace_id", 1),
    F::plain("universal_id", 2),
    F::plain("universal_id_type", 3),
];

const HD: &[F] = &[
    F::plain("namespace_id", 0),
    F::plain("universal_id", 1),
    F::plain("universal_id_type", 2),
];

const PL: &[F] = &[
    F::plain("point_of_care", 0),
    F::plain("room", 1),
    F::plain("bed", 2),
    F::composite("facility", 3, "HD"),
    F::plain("location_status", 4),
    F::plain("person_location_type", 5),
    F::plain("building", 6),
    F::plain("floor", 7),
    F::plain("location_description", 8),
];

const PT: &[F] = &[
    F::plain("processing_id", 0),
    F::plain("processing_mode", 1),
];

const SN: &[F] = &[
    F::plain("comparator", 0),
    F::numeric("num1", 1),
    F::plain("separatorsuffix", 2),
    F::numeric("num2", 3),
];

const TQ: &[F] = &[
    F::composite("quantity", 0, "CQ"),
    F::composite("interval", 1, "CM"),
    F::plain("duration", 2),
    F::timestamp("start_datetime", 3),
    F::timestamp("end_datetime", 4),
    F::plain("priority", 5),
    F::plain("condition", 6),
    F::plain("text", 7),
    F::plain("conjunction", 8),
    F::composite("order_sequencing", 9, "CM"),
];

const XAD: &[F] = &[
    F::plain("street_address", 0),
    F::plain("other_designation", 1),
    F::plain("city", 2),
    F::plain("state_or_province", 3),
    F::plain("zip_or_postal_code", 4),
    F::plain("country", 5),
    F::plain("address_type", 6),
    F::plain("other_geographic_designation", 7),
    F::plain("countyparish_code", 8),
    F::plain("census_tract", 9),
];

const XCN: &[F] = &[
    F::plain("id_number", 0),
    F::plain("family_name", 1),
    F::plain("given_name", 2),
    F::plain("middle_initial_or_name", 3),
    F::plain("suffix", 4),
    F::plain("prefix", 5),
    F::plain("degree", 6),
    F::plain("source_table", 7),
    F::composite("assigning_authority", 8, "HD"),
    F::plain("name_type_code", 9),
    F::plain("identifier_check_digit", 10),
    F::plain("code_identifying_the_check_digit_scheme_employed", 11),
    F::plain("identifier_type_code", 12),
    F::composite("assigning_facility", 13, "HD"),
];

const XPN: &[F] = &[
    F::plain("family_name", 0),
    F::plain("given_name", 1),
    F::plain("middle_initial_or_name", 2),
    F::plain("suffix", 3),
    F::plain("prefix", 4),
    F::plain("degree", 5),
    F::plain("name_type_code", 6),
];

const XTN: &[F] = &[
    F::plain("telephone_number", 0),
    F::plain("telecommunication_use_code", 1),
    F::plain("telecommunication_equipment_type", 2),
    F::plain("email_address", 3),
    F::numeric("country_code", 4),
    F::numeric("areacity_code", 5),
    F::numeric("phone_number", 6),
    F::numeric("extension", 7),
    F::plain("any_text", 8),
];
