// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    clients (id) {
        id -> BigInt,
        company_name -> Text,
        owner -> Nullable<Text>,
        tax_number -> Nullable<Text>,
        company_address -> Text,
        contact_data -> Text,
    }
}

diesel::table! {
    operators (operator_id) {
        operator_id -> BigInt,
        email -> Text,
        password_hash -> Text,
        theme -> Text,
        created_at -> Text,
        last_login_at -> Nullable<Text>,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        operator_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    sites (id) {
        id -> BigInt,
        site_name -> Text,
        official_name -> Nullable<Text>,
        site_type -> Text,
        region -> Nullable<Text>,
        address -> Nullable<Text>,
        coordinates -> Nullable<Text>,
        grid_connection_voltage -> Text,
        cee -> Nullable<Text>,
        operator -> Text,
        dc_capacity_kw -> Nullable<Double>,
        ac_capacity_kw -> Nullable<Double>,
        pcs -> Nullable<Text>,
        pcs_quantity -> Nullable<Integer>,
        module -> Nullable<Text>,
        module_quantity -> Nullable<Integer>,
        tilt -> Nullable<Text>,
        rated_power -> Nullable<Text>,
        nominal_energy_capacity -> Nullable<Text>,
        operating_capacity -> Nullable<Text>,
        battery -> Nullable<Text>,
        battery_containers_qty -> Nullable<Integer>,
        battery_modules_per_rack -> Nullable<Integer>,
        c_rate -> Nullable<Text>,
        electricity_selling_rate -> Nullable<Text>,
        cod -> Nullable<Text>,
        representative_aerial_url -> Nullable<Text>,
        representative_layout_url -> Nullable<Text>,
        site_documentation_url -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    team (id) {
        id -> BigInt,
        name -> Text,
        position -> Nullable<Text>,
        main_location -> Nullable<Text>,
        contract_type -> Nullable<Text>,
        email -> Text,
        phone -> Nullable<Text>,
    }
}

diesel::table! {
    tickets (id) {
        id -> BigInt,
        ticket_number -> Text,
        ticket_name -> Text,
        category -> Text,
        component_type -> Nullable<Text>,
        component_no -> Nullable<Text>,
        error_message -> Nullable<Text>,
        availability_loss -> Integer,
        downtime_start -> Nullable<Text>,
        downtime_end -> Nullable<Text>,
        downtime_duration -> Nullable<Text>,
        spare_parts_used -> Nullable<Text>,
        ticket_description -> Nullable<Text>,
        photo_url -> Nullable<Text>,
        photo_description -> Nullable<Text>,
        document_url -> Nullable<Text>,
        allocated_to -> Nullable<BigInt>,
        status -> Nullable<Text>,
        srs_ond_sales -> Integer,
        sales_amount -> Nullable<Double>,
        client_id -> Nullable<BigInt>,
        invoice_date -> Nullable<Text>,
        invoice_status -> Nullable<Text>,
        site_id -> Nullable<BigInt>,
        creation_date -> Text,
        closure_date -> Nullable<Text>,
    }
}

diesel::joinable!(sessions -> operators (operator_id));
diesel::joinable!(tickets -> clients (client_id));
diesel::joinable!(tickets -> sites (site_id));
diesel::joinable!(tickets -> team (allocated_to));

diesel::allow_tables_to_appear_in_same_query!(clients, operators, sessions, sites, team, tickets,);
