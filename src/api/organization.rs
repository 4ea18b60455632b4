use crate::blocks::{Organization, OrgUnitType, ProductVersions, Role, WhoAmIUser};
use crate::error::Result;
use crate::routes::lp;
use crate::valence::Valence;

impl Valence {
    /// The user the session is signed as
    pub fn whoami(&self) -> Result<Option<WhoAmIUser>> {
        self.fetch(&lp("/users/whoami"))
    }

    /// Root organization info; fetched once by the constructor
    pub fn get_organization(&self) -> Result<Option<Organization>> {
        self.fetch(&lp("/organization/info"))
    }

    /// Supported API versions of one product component (`lp`, `le`, ...)
    pub fn version(&self, product_code: &str) -> Result<Option<ProductVersions>> {
        self.fetch(&format!("/d2l/api/{}/versions/", product_code))
    }

    /// Supported API versions of every product component
    pub fn versions(&self) -> Result<Vec<ProductVersions>> {
        self.fetch_many("/d2l/api/versions/")
    }

    /// Role by ID
    pub fn get_role(&self, role_id: i64) -> Result<Option<Role>> {
        self.fetch(&lp(&format!("/roles/{}", role_id)))
    }

    /// Roles defined at the root organization
    pub fn get_roles(&self) -> Result<Vec<Role>> {
        self.fetch_many(&lp(&format!("/{}/roles/", self.root_org_segment())))
    }

    /// Org unit type by ID
    pub fn get_org_unit_type(&self, org_unit_type_id: i64) -> Result<Option<OrgUnitType>> {
        self.fetch(&lp(&format!("/outypes/{}", org_unit_type_id)))
    }

    /// Every org unit type defined for the organization
    pub fn get_org_unit_types(&self) -> Result<Vec<OrgUnitType>> {
        self.fetch_many(&lp("/outypes/"))
    }
}
