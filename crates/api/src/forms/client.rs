// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{CLIENT_REQUIRED, Client, FieldErrors, RequiredField, optional_text};
use time::PrimitiveDateTime;

use super::{FormSchema, FormValues, put, put_optional, text};

/// Client form layout.
pub struct ClientSchema;

impl FormSchema for ClientSchema {
    type Record = Client;

    const FIELDS: &'static [&'static str] = &[
        "company_name",
        "owner",
        "tax_number",
        "company_address",
        "contact_data",
    ];

    const RULES: &'static [RequiredField] = CLIENT_REQUIRED;

    fn seed(record: &Client) -> FormValues {
        let mut values: FormValues = FormValues::new();
        put(&mut values, "company_name", record.company_name.as_str());
        put_optional(&mut values, "owner", record.owner.as_ref());
        put_optional(&mut values, "tax_number", record.tax_number.as_ref());
        put(&mut values, "company_address", record.company_address.as_str());
        put(&mut values, "contact_data", record.contact_data.as_str());
        values
    }

    fn build(
        values: &FormValues,
        existing: Option<&Client>,
        _now: PrimitiveDateTime,
    ) -> Result<Client, FieldErrors> {
        Ok(Client {
            id: existing.and_then(|client| client.id),
            company_name: text(values, "company_name").trim().to_string(),
            owner: optional_text(text(values, "owner")),
            tax_number: optional_text(text(values, "tax_number")),
            company_address: text(values, "company_address").trim().to_string(),
            contact_data: text(values, "contact_data").trim().to_string(),
        })
    }
}
