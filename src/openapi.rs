use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    handler,
    handler::{
        admin::UserRoleUpdateRequest,
        departments::{
            DashboardResponse, DashboardUpdateRequest, DepartmentRequest, DepartmentResponse,
            DepartmentUpdateRequest,
        },
        event_levels::{EventLevelRequest, EventLevelResponse, EventLevelUpdateRequest},
        health::Health,
        images::{ImageRequest, ImageResponse},
        roles::{RoleRequest, RoleResponse, RoleUpdateRequest},
        users::{
            ChangePasswordRequest, SocialUserRegisterRequest, UserLoginRequest,
            UserRegisterRequest, UserUpdateRequest,
        },
    },
    repo::users::{DepartmentView, EventLevelView, UserView},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handler::health::health,
        handler::users::sign_up,
        handler::users::social_sign_up,
        handler::users::sign_in,
        handler::users::my_info,
        handler::users::update_my_info,
        handler::users::change_password,
        handler::users::withdraw_me,
        handler::users::exists_by_email,
        handler::images::get_image,
        handler::images::create_image,
        handler::images::update_image,
        handler::images::delete_image,
        handler::admin::list_users,
        handler::admin::get_user,
        handler::admin::list_users_by_department,
        handler::admin::update_user_role,
        handler::admin::delete_user,
        handler::departments::create_department,
        handler::departments::list_departments,
        handler::departments::get_department,
        handler::departments::update_department,
        handler::departments::delete_department,
        handler::departments::get_dashboard,
        handler::departments::update_dashboard,
        handler::roles::create_role,
        handler::roles::list_roles,
        handler::roles::get_role,
        handler::roles::update_role,
        handler::roles::delete_role,
        handler::event_levels::create_event_level,
        handler::event_levels::list_event_levels,
        handler::event_levels::get_event_level,
        handler::event_levels::update_event_level,
        handler::event_levels::delete_event_level
    ),
    components(schemas(
        Health,
        ErrorResponse,
        UserRegisterRequest,
        SocialUserRegisterRequest,
        UserLoginRequest,
        UserUpdateRequest,
        ChangePasswordRequest,
        UserRoleUpdateRequest,
        UserView,
        DepartmentView,
        EventLevelView,
        ImageRequest,
        ImageResponse,
        DepartmentRequest,
        DepartmentUpdateRequest,
        DepartmentResponse,
        DashboardUpdateRequest,
        DashboardResponse,
        RoleRequest,
        RoleUpdateRequest,
        RoleResponse,
        EventLevelRequest,
        EventLevelUpdateRequest,
        EventLevelResponse
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "users", description = "Account lifecycle"),
        (name = "images", description = "Profile images"),
        (name = "admin", description = "Administrative account management"),
        (name = "departments", description = "Department records"),
        (name = "roles", description = "Role records"),
        (name = "event-levels", description = "Event level records")
    )
)]
pub struct ApiDoc;
