use convoy_application::{CategoryStructure, PermissionStructure, RoleTemplateSummary};

use super::{
    CategoryStructureResponse, GranularGroupResponse, PermissionStructureResponse,
    RoleTemplateResponse,
};

impl From<PermissionStructure> for PermissionStructureResponse {
    fn from(value: PermissionStructure) -> Self {
        Self {
            permission_structure: value
                .categories
                .into_iter()
                .map(|category| (category.key.clone(), CategoryStructureResponse::from(category)))
                .collect(),
            role_templates: value
                .role_templates
                .into_iter()
                .map(|template| (template.key.clone(), RoleTemplateResponse::from(template)))
                .collect(),
            block_permissions: value.block_permissions,
            granular_permissions: value.granular_permissions,
        }
    }
}

impl From<CategoryStructure> for CategoryStructureResponse {
    fn from(value: CategoryStructure) -> Self {
        Self {
            name: value.name,
            icon: value.icon,
            blocks: value.blocks,
            granular: value
                .granular
                .into_iter()
                .map(|group| {
                    (
                        group.key,
                        GranularGroupResponse {
                            name: group.name,
                            permissions: group.permissions,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl From<RoleTemplateSummary> for RoleTemplateResponse {
    fn from(value: RoleTemplateSummary) -> Self {
        Self {
            name: value.name,
            description: value.description,
            block_permissions: value.block_permissions,
            granular_permissions: value.granular_permissions,
        }
    }
}
