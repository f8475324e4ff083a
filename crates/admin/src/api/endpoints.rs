//! REST API paths, relative to the configured API base.

use core::fmt::Display;

pub const LOGIN: &str = "/admin/login";

pub const ALL_CUSTOMERS: &str = "/admin/all-customers";
pub const REGISTER_CUSTOMER: &str = "/admin/customer-register";

pub fn update_user(id: impl Display) -> String {
    format!("/admin/users/update/{id}")
}

pub fn destroy_user(id: impl Display) -> String {
    format!("/admin/users/destroy/{id}")
}

pub const ORDERS: &str = "/admin/orders";

pub fn order_status(id: impl Display) -> String {
    format!("/admin/orders/{id}/status")
}

pub const ADMIN_PRODUCTS: &str = "/admin/products";
pub const PUBLIC_PRODUCTS: &str = "/product";
pub const ALL_PRODUCTS: &str = "/admin/all-products";
pub const NEW_PRODUCT: &str = "/admin/product/new-product";

pub fn update_product(id: impl Display) -> String {
    format!("/admin/product/update/{id}")
}

pub fn delete_product(id: impl Display) -> String {
    format!("/admin/product/delete/{id}")
}

pub fn user_details(id: impl Display) -> String {
    format!("/user/user-details/{id}")
}

pub const TWO_FACTOR_TOGGLE: &str = "/user/twofactor-toggle";
pub const CHANGE_PASSWORD: &str = "/user/change-password";

/// Append a query parameter to a path that may already carry a query.
pub fn with_query(path: &str, key: &str, value: impl Display) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}{key}={value}")
}
