// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{
    ContractType, FieldErrors, RequiredField, TEAM_MEMBER_REQUIRED, TeamMember, optional_text,
};
use time::PrimitiveDateTime;

use super::{FormSchema, FormValues, optional_choice, put, put_optional, text};

/// Team member form layout.
pub struct TeamSchema;

impl FormSchema for TeamSchema {
    type Record = TeamMember;

    const FIELDS: &'static [&'static str] = &[
        "name",
        "position",
        "main_location",
        "contract_type",
        "email",
        "phone",
    ];

    const RULES: &'static [RequiredField] = TEAM_MEMBER_REQUIRED;

    fn seed(record: &TeamMember) -> FormValues {
        let mut values: FormValues = FormValues::new();
        put(&mut values, "name", record.name.as_str());
        put_optional(&mut values, "position", record.position.as_ref());
        put_optional(&mut values, "main_location", record.main_location.as_ref());
        put_optional(&mut values, "contract_type", record.contract_type);
        put(&mut values, "email", record.email.as_str());
        put_optional(&mut values, "phone", record.phone.as_ref());
        values
    }

    fn build(
        values: &FormValues,
        existing: Option<&TeamMember>,
        _now: PrimitiveDateTime,
    ) -> Result<TeamMember, FieldErrors> {
        let mut errors: FieldErrors = FieldErrors::new();
        let contract_type: Option<ContractType> =
            optional_choice(values, "contract_type", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TeamMember {
            id: existing.and_then(|member| member.id),
            name: text(values, "name").trim().to_string(),
            position: optional_text(text(values, "position")),
            main_location: optional_text(text(values, "main_location")),
            contract_type,
            email: text(values, "email").trim().to_string(),
            phone: optional_text(text(values, "phone")),
        })
    }
}
