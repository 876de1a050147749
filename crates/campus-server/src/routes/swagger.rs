//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    CreateInvoiceRequest, CreateStudentRequest, ErrorBody, HealthResponse, InvoiceResponse,
    StudentResponse, UpdateStudentRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        super::health::health_check,
        // Student endpoints
        super::students::list_students,
        super::students::create_student,
        super::students::get_student,
        super::students::update_student,
        super::students::delete_student,
        // Invoice endpoints
        super::invoices::list_invoices,
        super::invoices::create_invoice,
        super::invoices::get_invoice,
        super::invoices::pay_invoice,
        super::invoices::void_invoice,
    ),
    info(
        title = "EdTech Platform API",
        version = "0.1.0",
        description = "School management backend: administrative, financial, academic and communication slices.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Administrative", description = "Students and enrollment records"),
        (name = "Financial", description = "Invoices and payments"),
    ),
    components(
        schemas(
            ErrorBody,
            HealthResponse,
            // Students
            CreateStudentRequest,
            UpdateStudentRequest,
            StudentResponse,
            // Invoices
            CreateInvoiceRequest,
            InvoiceResponse,
        )
    ),
)]
pub struct ApiDoc;
