//! # Native Property Store
//!
//! Thin wrapper over bionic's private property-area API
//! (`sys/_system_properties.h`). Only `init`-context processes may call
//! `__system_property_update` / `__system_property_add`; anywhere else the
//! writes are refused and show up as [`Outcome::Rejected`](ih8sn_core::Outcome).

use ih8sn_core::primitives::PROP_VALUE_MAX;
use ih8sn_core::{Ih8snError, PropertyStore};
use libc::{c_char, c_int, c_uint};
use std::ffi::{CStr, CString};
use std::ptr::NonNull;

/// Opaque bionic `prop_info`.
#[repr(C)]
pub struct PropInfo {
    _private: [u8; 0],
}

unsafe extern "C" {
    fn __system_properties_init() -> c_int;
    fn __system_property_find(name: *const c_char) -> *const PropInfo;
    fn __system_property_read(pi: *const PropInfo, name: *mut c_char, value: *mut c_char)
    -> c_int;
    fn __system_property_update(pi: *mut PropInfo, value: *const c_char, len: c_uint) -> c_int;
    fn __system_property_add(
        name: *const c_char,
        namelen: c_uint,
        value: *const c_char,
        valuelen: c_uint,
    ) -> c_int;
}

/// Handle to a `prop_info` inside the mapped property area.
///
/// The area is mapped for the lifetime of the process, so handles never
/// dangle.
#[derive(Debug, Clone, Copy)]
pub struct PropHandle(NonNull<PropInfo>);

/// The process-wide Android property store.
#[derive(Debug)]
pub struct AndroidPropertyStore {
    _initialized: (),
}

impl AndroidPropertyStore {
    /// Map the property area. Fails if bionic cannot initialize it.
    pub fn init() -> Result<Self, Ih8snError> {
        // SAFETY: no preconditions; safe to call more than once.
        let rc = unsafe { __system_properties_init() };
        if rc != 0 {
            return Err(Ih8snError::StoreInit(format!(
                "__system_properties_init returned {}",
                rc
            )));
        }
        Ok(Self { _initialized: () })
    }
}

impl PropertyStore for AndroidPropertyStore {
    type Handle = PropHandle;

    fn find(&self, name: &str) -> Option<PropHandle> {
        // A name with an interior NUL cannot exist in the area
        let name = CString::new(name).ok()?;
        // SAFETY: `name` is a valid NUL-terminated string for the call.
        let pi = unsafe { __system_property_find(name.as_ptr()) };
        NonNull::new(pi.cast_mut()).map(PropHandle)
    }

    fn read(&self, handle: PropHandle) -> String {
        let mut value = [0 as c_char; PROP_VALUE_MAX];
        // SAFETY: `handle` came from `__system_property_find`; `value` holds
        // PROP_VALUE_MAX bytes as the API requires; a null name is allowed.
        unsafe {
            __system_property_read(handle.0.as_ptr(), std::ptr::null_mut(), value.as_mut_ptr());
        }
        // SAFETY: bionic always NUL-terminates within PROP_VALUE_MAX.
        unsafe { CStr::from_ptr(value.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    fn update(&mut self, handle: PropHandle, value: &str) -> bool {
        let Ok(len) = c_uint::try_from(value.len()) else {
            return false;
        };
        // SAFETY: `handle` came from `__system_property_find`; `value` is
        // valid for `len` bytes.
        let rc = unsafe { __system_property_update(handle.0.as_ptr(), value.as_ptr().cast(), len) };
        rc == 0
    }

    fn add(&mut self, name: &str, value: &str) -> bool {
        let (Ok(namelen), Ok(valuelen)) = (
            c_uint::try_from(name.len()),
            c_uint::try_from(value.len()),
        ) else {
            return false;
        };
        // SAFETY: both buffers are valid for the lengths passed.
        let rc = unsafe {
            __system_property_add(
                name.as_ptr().cast(),
                namelen,
                value.as_ptr().cast(),
                valuelen,
            )
        };
        rc == 0
    }
}
