//! Expansion coefficients of the Voigt function in the damping parameter.
//!
//! Each row holds v followed by H0(v), H1(v), H2(v), H3(v) and H4(v), so that
//! H(a, v) = H0 + a H1 + a^2 H2 + a^3 H3 + a^4 H4 (Gray, The Observation and
//! Analysis of Stellar Photospheres, table 11.5).

pub const NUM_HJERTING_ROWS: usize = 81;

/// Largest tabulated |v|.
pub const MAX_HJERTING_V: f64 = 12.0;

pub static HJERTING_COMPONENTS: [[f64; 6]; NUM_HJERTING_ROWS] = [
    [0.0, 1.000000, -1.12838, 1.0000, -0.752, 0.50],
    [0.1, 0.990050, -1.10596, 0.9702, -0.722, 0.48],
    [0.2, 0.960789, -1.04048, 0.8839, -0.637, 0.40],
    [0.3, 0.913931, -0.93703, 0.7494, -0.505, 0.30],
    [0.4, 0.852144, -0.80346, 0.5795, -0.342, 0.17],
    [0.5, 0.778801, -0.64945, 0.3894, -0.165, 0.03],
    [0.6, 0.697676, -0.48582, 0.1953, 0.007, -0.09],
    [0.7, 0.612626, -0.32192, 0.0123, 0.159, -0.20],
    [0.8, 0.527292, -0.16772, -0.1476, 0.280, -0.27],
    [0.9, 0.444858, -0.03012, -0.2758, 0.362, -0.30],
    [1.0, 0.367879, 0.08594, -0.3679, 0.405, -0.31],
    [1.1, 0.298197, 0.17789, -0.4234, 0.411, -0.28],
    [1.2, 0.236928, 0.24537, -0.4454, 0.386, -0.24],
    [1.3, 0.184520, 0.28981, -0.4392, 0.339, -0.18],
    [1.4, 0.140858, 0.31394, -0.4113, 0.280, -0.12],
    [1.5, 0.105399, 0.32130, -0.3689, 0.215, -0.07],
    [1.6, 0.077305, 0.31573, -0.3185, 0.153, -0.02],
    [1.7, 0.055576, 0.30094, -0.2657, 0.097, 0.02],
    [1.8, 0.039164, 0.28027, -0.2146, 0.051, 0.04],
    [1.9, 0.027052, 0.25648, -0.1683, 0.015, 0.05],
    [2.0, 0.0183156, 0.231726, -0.12821, -0.0101, 0.058],
    [2.1, 0.0121552, 0.207528, -0.09505, -0.0265, 0.056],
    [2.2, 0.0079071, 0.184882, -0.06863, -0.0355, 0.051],
    [2.3, 0.0050418, 0.164341, -0.04830, -0.0391, 0.043],
    [2.4, 0.0031511, 0.146128, -0.03315, -0.0389, 0.035],
    [2.5, 0.0019305, 0.130236, -0.02220, -0.0363, 0.027],
    [2.6, 0.0011592, 0.116515, -0.01451, -0.0325, 0.020],
    [2.7, 0.0006823, 0.104739, -0.00927, -0.0282, 0.015],
    [2.8, 0.0003937, 0.094653, -0.00578, -0.0239, 0.010],
    [2.9, 0.0002226, 0.086005, -0.00352, -0.0201, 0.007],
    [3.0, 0.0001234, 0.078565, -0.00210, -0.0167, 0.005],
    [3.1, 0.0000671, 0.072129, -0.00122, -0.0138, 0.003],
    [3.2, 0.0000357, 0.066526, -0.00070, -0.0115, 0.002],
    [3.3, 0.0000186, 0.061615, -0.00039, -0.0096, 0.001],
    [3.4, 0.0000095, 0.057281, -0.00021, -0.0080, 0.001],
    [3.5, 0.0000048, 0.053430, -0.00011, -0.0068, 0.000],
    [3.6, 0.0000024, 0.049988, -0.00006, -0.0058, 0.000],
    [3.7, 0.0000011, 0.046894, -0.00003, -0.0050, 0.000],
    [3.8, 0.0000005, 0.044098, -0.00001, -0.0043, 0.000],
    [3.9, 0.0000002, 0.041561, -0.00001, -0.0037, 0.000],
    [4.0, 0.0000000, 0.039250, 0.00000, -0.00329, 0.000],
    [4.2, 0.0000000, 0.035195, 0.00000, -0.00257, 0.000],
    [4.4, 0.0000000, 0.031762, 0.00000, -0.00205, 0.000],
    [4.6, 0.0000000, 0.028824, 0.00000, -0.00166, 0.000],
    [4.8, 0.0000000, 0.026288, 0.00000, -0.00137, 0.000],
    [5.0, 0.0000000, 0.024081, 0.00000, -0.00113, 0.000],
    [5.2, 0.0000000, 0.022146, 0.00000, -0.00095, 0.000],
    [5.4, 0.0000000, 0.020441, 0.00000, -0.00080, 0.000],
    [5.6, 0.0000000, 0.018929, 0.00000, -0.00068, 0.000],
    [5.8, 0.0000000, 0.017582, 0.00000, -0.00059, 0.000],
    [6.0, 0.0000000, 0.016375, 0.00000, -0.00051, 0.000],
    [6.2, 0.0000000, 0.015291, 0.00000, -0.00044, 0.000],
    [6.4, 0.0000000, 0.014312, 0.00000, -0.00038, 0.000],
    [6.6, 0.0000000, 0.013426, 0.00000, -0.00034, 0.000],
    [6.8, 0.0000000, 0.012620, 0.00000, -0.00030, 0.000],
    [7.0, 0.0000000, 0.0118860, 0.00000, -0.00026, 0.000],
    [7.2, 0.0000000, 0.0112145, 0.00000, -0.00023, 0.000],
    [7.4, 0.0000000, 0.0105990, 0.00000, -0.00021, 0.000],
    [7.6, 0.0000000, 0.0100332, 0.00000, -0.00019, 0.000],
    [7.8, 0.0000000, 0.0095119, 0.00000, -0.00017, 0.000],
    [8.0, 0.0000000, 0.0090306, 0.00000, -0.00015, 0.000],
    [8.2, 0.0000000, 0.0085852, 0.00000, -0.00013, 0.000],
    [8.4, 0.0000000, 0.0081722, 0.00000, -0.00012, 0.000],
    [8.6, 0.0000000, 0.0077885, 0.00000, -0.00011, 0.000],
    [8.8, 0.0000000, 0.0074314, 0.00000, -0.00010, 0.000],
    [9.0, 0.0000000, 0.0070985, 0.00000, -0.00009, 0.000],
    [9.2, 0.0000000, 0.0067875, 0.00000, -0.00008, 0.000],
    [9.4, 0.0000000, 0.0064967, 0.00000, -0.00008, 0.000],
    [9.6, 0.0000000, 0.0062243, 0.00000, -0.00007, 0.000],
    [9.8, 0.0000000, 0.0059688, 0.00000, -0.00007, 0.000],
    [10.0, 0.000000, 0.0057287, 0.00000, -0.00006, 0.000],
    [10.2, 0.000000, 0.0055030, 0.00000, -0.00006, 0.000],
    [10.4, 0.000000, 0.0052903, 0.00000, -0.00005, 0.000],
    [10.6, 0.000000, 0.0050898, 0.00000, -0.00005, 0.000],
    [10.8, 0.000000, 0.0049006, 0.00000, -0.00004, 0.000],
    [11.0, 0.000000, 0.0047217, 0.00000, -0.00004, 0.000],
    [11.2, 0.000000, 0.0045526, 0.00000, -0.00004, 0.000],
    [11.4, 0.000000, 0.0043924, 0.00000, -0.00003, 0.000],
    [11.6, 0.000000, 0.0042405, 0.00000, -0.00003, 0.000],
    [11.8, 0.000000, 0.0040964, 0.00000, -0.00003, 0.000],
    [12.0, 0.000000, 0.0039595, 0.00000, -0.00003, 0.000],
];
