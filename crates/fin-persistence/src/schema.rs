//! Esquema Diesel (declarado a mano, reemplazable con `diesel print-schema`).

diesel::table! {
    users (id) {
        id -> BigInt,
        name -> Text,
        email -> Text,
    }
}

diesel::table! {
    user_profiles (user_id) {
        user_id -> BigInt,
        monthly_income -> Nullable<Double>,
        monthly_expenses -> Nullable<Double>,
        risk_appetite -> Nullable<Text>,
        investment_horizon_years -> Nullable<Integer>,
        financial_goals -> Nullable<Text>,
    }
}

diesel::table! {
    recommendations (id) {
        id -> BigInt,
        user_id -> BigInt,
        payload_hash -> Text,
        recommendation_json -> Text,
        created_at -> Text,
    }
}

diesel::joinable!(user_profiles -> users (user_id));
diesel::joinable!(recommendations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_profiles, recommendations,);
