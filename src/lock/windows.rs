/// Windows open-file detection via the Restart Manager
use super::{LockStatus, OpenFileInspector};
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;
use winapi::shared::minwindef::{DWORD, UINT};
use winapi::shared::winerror::{ERROR_MORE_DATA, ERROR_SUCCESS};
use winapi::um::restartmanager::{
    RM_PROCESS_INFO, RmEndSession, RmGetList, RmRegisterResources, RmStartSession,
};

/// Session key buffer: CCH_RM_SESSION_KEY plus terminator
const SESSION_KEY_LEN: usize = 64;

/// Asks the Restart Manager which processes use a file.
#[derive(Debug, Default)]
pub struct RestartManagerInspector;

impl OpenFileInspector for RestartManagerInspector {
    fn inspect(&self, path: &Path) -> LockStatus {
        let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
        let mut session: DWORD = 0;
        let mut key = [0u16; SESSION_KEY_LEN];

        unsafe {
            let rc = RmStartSession(&mut session, 0, key.as_mut_ptr());
            if rc != ERROR_SUCCESS {
                return LockStatus::Unknown(format!("RmStartSession failed with code {}", rc));
            }

            let status = query(session, &wide);
            RmEndSession(session);
            status
        }
    }
}

unsafe fn query(session: DWORD, wide_path: &[u16]) -> LockStatus {
    let mut files = [wide_path.as_ptr()];
    let rc = unsafe {
        RmRegisterResources(
            session,
            1,
            files.as_mut_ptr(),
            0,
            ptr::null_mut(),
            0,
            ptr::null_mut(),
        )
    };
    if rc != ERROR_SUCCESS {
        return LockStatus::Unknown(format!("RmRegisterResources failed with code {}", rc));
    }

    let mut needed: UINT = 0;
    let mut count: UINT = 0;
    let mut reasons: DWORD = 0;
    let rc = unsafe { RmGetList(session, &mut needed, &mut count, ptr::null_mut(), &mut reasons) };

    match rc {
        ERROR_SUCCESS => LockStatus::Unlocked,
        ERROR_MORE_DATA => {
            let mut infos: Vec<RM_PROCESS_INFO> = Vec::with_capacity(needed as usize);
            let mut count: UINT = needed;
            let rc = unsafe {
                RmGetList(session, &mut needed, &mut count, infos.as_mut_ptr(), &mut reasons)
            };
            if rc != ERROR_SUCCESS {
                return LockStatus::Unknown(format!("RmGetList failed with code {}", rc));
            }
            unsafe { infos.set_len(count as usize) };
            match infos.first() {
                Some(info) => LockStatus::Locked {
                    pid: info.Process.dwProcessId,
                },
                None => LockStatus::Unlocked,
            }
        }
        other => LockStatus::Unknown(format!("RmGetList failed with code {}", other)),
    }
}
