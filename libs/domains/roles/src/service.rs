use crud::CrudService;

use crate::models::Role;

/// Roles need no behaviour beyond the generic CRUD contract.
pub type RoleService<R> = CrudService<Role, R>;
