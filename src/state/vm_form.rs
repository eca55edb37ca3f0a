//! Create-VM form model.
//!
//! An offer fixes the machine size and an image fixes the OS. Picking a
//! cluster sends the request straight to the VM host; leaving it empty asks
//! the cluster service to place the machine.

#[cfg(test)]
#[path = "vm_form_test.rs"]
mod vm_form_test;

use crate::net::types::{CreateVmRequest, HostRequirements, SystemImage, VmOffer};
use crate::util::validation::{FieldError, validate_root_password, validate_vm};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VmDraft {
    pub name: String,
    pub offer: Option<VmOffer>,
    pub image: Option<SystemImage>,
    pub cluster_id: Option<i64>,
    pub root_password: String,
    pub confirm_password: String,
    pub ssh_public_key: String,
}

/// Where a validated draft is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Direct(CreateVmRequest),
    Scheduled(HostRequirements),
}

impl VmDraft {
    /// Validate the draft and build the request for `user_id`.
    ///
    /// # Errors
    ///
    /// The first failing field, in form order.
    pub fn build(&self, user_id: i64) -> Result<Placement, FieldError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FieldError::Required("name"));
        }
        let offer = self.offer.as_ref().ok_or(FieldError::Required("offer"))?;
        let image = self.image.as_ref().ok_or(FieldError::Required("system image"))?;
        validate_vm(name, offer.cpu_count, offer.memory_size_mib, offer.disk_size_gb)?;
        validate_root_password(&self.root_password, &self.confirm_password)?;

        let placement = match self.cluster_id {
            Some(cluster_id) => Placement::Direct(CreateVmRequest {
                name: name.to_owned(),
                user_id: user_id.to_string(),
                service_cluster_id: Some(cluster_id),
                cpu_count: offer.cpu_count,
                memory_size_mib: offer.memory_size_mib,
                disk_size_gb: offer.disk_size_gb,
                os_type: image.os_type.clone(),
                ssh_public_key: Some(self.ssh_public_key.trim().to_owned()).filter(|k| !k.is_empty()),
                root_password: self.root_password.clone(),
                vm_offer_id: Some(offer.id),
                system_image_id: Some(image.id),
            }),
            None => Placement::Scheduled(HostRequirements {
                name: name.to_owned(),
                user_id: user_id.to_string(),
                cpu_count: offer.cpu_count,
                memory_size_mib: offer.memory_size_mib,
                disk_size_gb: offer.disk_size_gb,
                os_type: image.os_type.clone(),
                root_password: self.root_password.clone(),
                vm_offer_id: offer.id.to_string(),
                system_image_id: image.id.to_string(),
            }),
        };
        Ok(placement)
    }
}
