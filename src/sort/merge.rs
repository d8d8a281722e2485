/*!
 * Merge Kernels
 *
 * In-place linear-time merges of two equal-length monotone runs. The
 * result lands back in the input segments (first half in `seg1`, second in
 * `seg2`) by way of a caller-provided scratch buffer of twice the segment
 * size. Each input may be ascending or descending; the public entry points
 * detect the direction from the endpoints and dispatch to one of eight
 * single-pass kernels that walk each input from the correct end.
 *
 * Ties prefer the element from `seg1`, so the merge is stable with respect
 * to segment provenance.
 */

/// Copy the merged buffer halves back into the source segments.
#[inline]
fn scatter<T: Copy>(buf: &[T], seg1: &mut [T], seg2: &mut [T]) {
    let n = seg1.len();
    seg1.copy_from_slice(&buf[..n]);
    seg2.copy_from_slice(&buf[n..]);
}

/// A monotone run reads as ascending when its endpoints do.
///
/// A monotone segment with equal endpoints is constant, so either answer
/// is correct for it.
#[inline]
fn ascending<T: Ord>(seg: &[T]) -> bool {
    seg[0] <= seg[seg.len() - 1]
}

fn up_from_up_up<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < n && j < n {
        if seg1[i] <= seg2[j] {
            buf[k] = seg1[i];
            i += 1;
        } else {
            buf[k] = seg2[j];
            j += 1;
        }
        k += 1;
    }
    while i < n {
        buf[k] = seg1[i];
        i += 1;
        k += 1;
    }
    while j < n {
        buf[k] = seg2[j];
        j += 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn up_from_up_dn<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let (mut i, mut k) = (0, 0);
    let mut j = n;
    while i < n && j > 0 {
        if seg1[i] <= seg2[j - 1] {
            buf[k] = seg1[i];
            i += 1;
        } else {
            buf[k] = seg2[j - 1];
            j -= 1;
        }
        k += 1;
    }
    while i < n {
        buf[k] = seg1[i];
        i += 1;
        k += 1;
    }
    while j > 0 {
        buf[k] = seg2[j - 1];
        j -= 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn up_from_dn_up<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let (mut j, mut k) = (0, 0);
    let mut i = n;
    while i > 0 && j < n {
        if seg1[i - 1] <= seg2[j] {
            buf[k] = seg1[i - 1];
            i -= 1;
        } else {
            buf[k] = seg2[j];
            j += 1;
        }
        k += 1;
    }
    while i > 0 {
        buf[k] = seg1[i - 1];
        i -= 1;
        k += 1;
    }
    while j < n {
        buf[k] = seg2[j];
        j += 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn up_from_dn_dn<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let mut k = 0;
    let (mut i, mut j) = (n, n);
    while i > 0 && j > 0 {
        if seg1[i - 1] <= seg2[j - 1] {
            buf[k] = seg1[i - 1];
            i -= 1;
        } else {
            buf[k] = seg2[j - 1];
            j -= 1;
        }
        k += 1;
    }
    while i > 0 {
        buf[k] = seg1[i - 1];
        i -= 1;
        k += 1;
    }
    while j > 0 {
        buf[k] = seg2[j - 1];
        j -= 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn dn_from_up_up<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let mut k = 0;
    let (mut i, mut j) = (n, n);
    while i > 0 && j > 0 {
        if seg1[i - 1] >= seg2[j - 1] {
            buf[k] = seg1[i - 1];
            i -= 1;
        } else {
            buf[k] = seg2[j - 1];
            j -= 1;
        }
        k += 1;
    }
    while i > 0 {
        buf[k] = seg1[i - 1];
        i -= 1;
        k += 1;
    }
    while j > 0 {
        buf[k] = seg2[j - 1];
        j -= 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn dn_from_up_dn<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let (mut j, mut k) = (0, 0);
    let mut i = n;
    while i > 0 && j < n {
        if seg1[i - 1] >= seg2[j] {
            buf[k] = seg1[i - 1];
            i -= 1;
        } else {
            buf[k] = seg2[j];
            j += 1;
        }
        k += 1;
    }
    while i > 0 {
        buf[k] = seg1[i - 1];
        i -= 1;
        k += 1;
    }
    while j < n {
        buf[k] = seg2[j];
        j += 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn dn_from_dn_up<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let (mut i, mut k) = (0, 0);
    let mut j = n;
    while i < n && j > 0 {
        if seg1[i] >= seg2[j - 1] {
            buf[k] = seg1[i];
            i += 1;
        } else {
            buf[k] = seg2[j - 1];
            j -= 1;
        }
        k += 1;
    }
    while i < n {
        buf[k] = seg1[i];
        i += 1;
        k += 1;
    }
    while j > 0 {
        buf[k] = seg2[j - 1];
        j -= 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

fn dn_from_dn_dn<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    let n = seg1.len();
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < n && j < n {
        if seg1[i] >= seg2[j] {
            buf[k] = seg1[i];
            i += 1;
        } else {
            buf[k] = seg2[j];
            j += 1;
        }
        k += 1;
    }
    while i < n {
        buf[k] = seg1[i];
        i += 1;
        k += 1;
    }
    while j < n {
        buf[k] = seg2[j];
        j += 1;
        k += 1;
    }
    scatter(buf, seg1, seg2);
}

/// Merge two equal-length monotone segments into ascending order, in place.
///
/// `buf` must be exactly twice the segment length. Input direction is
/// detected per segment; any combination is accepted.
pub fn merge_up<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    debug_assert_eq!(seg1.len(), seg2.len());
    debug_assert_eq!(buf.len(), seg1.len() + seg2.len());
    match (ascending(seg1), ascending(seg2)) {
        (true, true) => up_from_up_up(seg1, seg2, buf),
        (true, false) => up_from_up_dn(seg1, seg2, buf),
        (false, true) => up_from_dn_up(seg1, seg2, buf),
        (false, false) => up_from_dn_dn(seg1, seg2, buf),
    }
}

/// Merge two equal-length monotone segments into descending order, in place.
pub fn merge_dn<T: Ord + Copy>(seg1: &mut [T], seg2: &mut [T], buf: &mut [T]) {
    debug_assert_eq!(seg1.len(), seg2.len());
    debug_assert_eq!(buf.len(), seg1.len() + seg2.len());
    match (ascending(seg1), ascending(seg2)) {
        (true, true) => dn_from_up_up(seg1, seg2, buf),
        (true, false) => dn_from_up_dn(seg1, seg2, buf),
        (false, true) => dn_from_dn_up(seg1, seg2, buf),
        (false, false) => dn_from_dn_dn(seg1, seg2, buf),
    }
}
